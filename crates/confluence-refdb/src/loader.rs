use confluence_core::reference_db::NodeRecord;
use confluence_core::{Reach, ReferenceDb};
use ndarray::Array2;

use crate::error::{RefDbError, Result};

/// Opens a SWORD-format NetCDF4 reference database for one continent.
///
/// The `reaches` group holds parallel 1-D arrays (`reach_id`, `facc`,
/// `n_rch_up`, `n_rch_down`, `swot_obs`) and 2-D arrays (`rch_id_up`,
/// `rch_id_dn`, `swot_orbits`) whose leading axis is the small
/// domain/orbit axis (padded to the widest degree/observation count in the
/// file) and whose trailing axis is `num_reaches`; each reach's column is
/// truncated to its own declared count. The `nodes` group holds a parallel
/// `node_id`/`reach_id` table.
pub fn load(path: &str) -> Result<ReferenceDb> {
    let file = netcdf::open(path)?;

    let reaches_group = file.group("reaches")?.ok_or_else(|| RefDbError::Shape("missing reaches group".into()))?;

    let reach_id = read_i64_1d(&reaches_group, "reach_id")?;
    let facc = read_f64_1d(&reaches_group, "facc")?;
    let n_up = read_i64_1d(&reaches_group, "n_rch_up")?;
    let n_down = read_i64_1d(&reaches_group, "n_rch_down")?;
    let swot_obs = read_i64_1d(&reaches_group, "swot_obs")?;
    let up_ids = read_i64_2d(&reaches_group, "rch_id_up")?;
    let down_ids = read_i64_2d(&reaches_group, "rch_id_dn")?;
    let swot_orbits = read_i64_2d(&reaches_group, "swot_orbits")?;

    let count = reach_id.len();
    let mut reaches = Vec::with_capacity(count);
    for i in 0..count {
        let up_degree = n_up[i].max(0) as usize;
        let down_degree = n_down[i].max(0) as usize;
        let obs_count = swot_obs[i].max(0) as usize;

        reaches.push(Reach {
            reach_id: reach_id[i],
            facc: facc[i],
            n_up: n_up[i].clamp(0, u8::MAX as i64) as u8,
            n_down: n_down[i].clamp(0, u8::MAX as i64) as u8,
            up_ids: up_ids.column(i).iter().take(up_degree).copied().collect(),
            down_ids: down_ids.column(i).iter().take(down_degree).copied().collect(),
            swot_obs: swot_obs[i].max(0) as u32,
            swot_orbits: swot_orbits.column(i).iter().take(obs_count).copied().collect(),
        });
    }

    let nodes = if let Some(nodes_group) = file.group("nodes")? {
        let node_id = read_i64_1d(&nodes_group, "node_id")?;
        let node_reach_id = read_i64_1d(&nodes_group, "reach_id")?;
        node_id
            .into_iter()
            .zip(node_reach_id)
            .map(|(node_id, reach_id)| NodeRecord { node_id, reach_id })
            .collect()
    } else {
        Vec::new()
    };

    Ok(ReferenceDb::new(reaches, nodes))
}

fn read_f64_1d(group: &netcdf::Group, name: &str) -> Result<Vec<f64>> {
    let var = group.variable(name).ok_or_else(|| RefDbError::Shape(format!("missing variable {name}")))?;
    Ok(var.get_values::<f64, _>(..)?.into_raw_vec())
}

fn read_i64_1d(group: &netcdf::Group, name: &str) -> Result<Vec<i64>> {
    let var = group.variable(name).ok_or_else(|| RefDbError::Shape(format!("missing variable {name}")))?;
    Ok(var.get_values::<i64, _>(..)?.into_raw_vec())
}

fn read_i64_2d(group: &netcdf::Group, name: &str) -> Result<Array2<i64>> {
    let var = group.variable(name).ok_or_else(|| RefDbError::Shape(format!("missing variable {name}")))?;
    let flat = var.get_values::<i64, _>(..)?;
    let shape = var.dimensions();
    if shape.len() != 2 {
        return Err(RefDbError::Shape(format!("{name} is not a 2-D variable")));
    }
    let rows = shape[0].len();
    let cols = shape[1].len();
    Array2::from_shape_vec((rows, cols), flat.into_raw_vec())
        .map_err(|e| RefDbError::Shape(format!("{name} shape mismatch: {e}")))
}
