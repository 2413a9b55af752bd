use confluence_core::{AlgorithmProfile, ObservedReaches, Reach};

/// Phase B: is `cand` admissible as the next hop from `seed`?
///
/// All four conditions must hold. The drainage-area test is intentionally
/// one-sided: a candidate with *smaller* `facc` than the seed always passes,
/// only upward growth is bounded by `drainage_area_pct_cutoff`. The junction
/// condition checks both reaches' full degree, independent of which way the
/// walk calling this is headed.
pub fn admissible(seed: &Reach, cand: &Reach, profile: &AlgorithmProfile, observed: &ObservedReaches) -> bool {
    if !observed.contains(cand.reach_id) {
        return false;
    }

    if profile.require_identical_orbits
        && (seed.swot_obs != cand.swot_obs || seed.swot_orbits != cand.swot_orbits)
    {
        return false;
    }

    let drainage_pct = (cand.facc - seed.facc) / seed.facc * 100.0;
    if drainage_pct > profile.drainage_area_pct_cutoff {
        return false;
    }

    if !profile.allow_river_junction && (seed.has_river_junction() || cand.has_river_junction()) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reach(id: i64, facc: f64, n_up: u8, n_down: u8, orbits: Vec<i64>) -> Reach {
        Reach {
            reach_id: id,
            facc,
            n_up,
            n_down,
            up_ids: vec![],
            down_ids: vec![],
            swot_obs: orbits.len() as u32,
            swot_orbits: orbits,
        }
    }

    #[test]
    fn rejects_reach_not_in_observed_population() {
        let seed = reach(1, 100.0, 1, 1, vec![1]);
        let cand = reach(2, 100.0, 1, 1, vec![1]);
        let observed = ObservedReaches::new([1]);
        let profile = AlgorithmProfile::metro_man();
        assert!(!admissible(&seed, &cand, &profile, &observed));
    }

    #[test]
    fn requires_identical_orbits_when_profile_demands_it() {
        let seed = reach(1, 100.0, 1, 1, vec![10, 20]);
        let cand = reach(2, 105.0, 1, 1, vec![10, 20, 30]);
        let observed = ObservedReaches::new([1, 2]);
        let profile = AlgorithmProfile::metro_man();
        assert!(!admissible(&seed, &cand, &profile, &observed));
    }

    #[test]
    fn smaller_facc_always_passes_drainage_test() {
        let seed = reach(1, 100.0, 1, 1, vec![1]);
        let cand = reach(2, 10.0, 1, 1, vec![1]);
        let observed = ObservedReaches::new([1, 2]);
        let mut profile = AlgorithmProfile::hivdi();
        profile.require_identical_orbits = false;
        assert!(admissible(&seed, &cand, &profile, &observed));
    }

    #[test]
    fn larger_facc_beyond_cutoff_fails() {
        let seed = reach(1, 100.0, 1, 1, vec![1]);
        let cand = reach(2, 140.0, 1, 1, vec![1]);
        let observed = ObservedReaches::new([1, 2]);
        let profile = AlgorithmProfile::hivdi(); // cutoff 30%
        assert!(!admissible(&seed, &cand, &profile, &observed));
    }

    #[test]
    fn junction_rejected_when_profile_disallows_it() {
        let seed = reach(1, 100.0, 2, 1, vec![1]);
        let cand = reach(2, 100.0, 1, 1, vec![1]);
        let observed = ObservedReaches::new([1, 2]);
        let profile = AlgorithmProfile::metro_man();
        assert!(!admissible(&seed, &cand, &profile, &observed));
    }

    /// `n_down` matters just as much as `n_up` — the junction check is not
    /// scoped to whichever degree happens to match the walk's direction.
    #[test]
    fn junction_on_the_orthogonal_degree_axis_is_still_rejected() {
        let seed = reach(1, 100.0, 1, 2, vec![1]);
        let cand = reach(2, 100.0, 1, 1, vec![1]);
        let observed = ObservedReaches::new([1, 2]);
        let profile = AlgorithmProfile::metro_man();
        assert!(!admissible(&seed, &cand, &profile, &observed));
    }
}
