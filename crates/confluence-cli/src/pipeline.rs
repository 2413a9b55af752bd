use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Context, Result};
use aws_sdk_ssm::Client as SsmClient;
use confluence_core::{AlgorithmProfile, Continent, ObservedReaches};
use confluence_creds::CredentialBroker;
use confluence_manifest::ManifestWriter;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

use crate::filenames::{sos_filename, sword_filename, SWORD_VERSION};
use crate::inputs;
use crate::options::Options;

/// Runs the full leaves-first pipeline for one continent: list granules,
/// read shapefiles, index cycles/passes, load the reference database, build
/// inversion sets for every standard profile, and write every manifest file.
///
/// `cancel` is checked at each stage boundary; a triggered token aborts the
/// run before the next stage starts rather than mid-stage, matching the
/// leaves-first cancellation propagation described for this pipeline.
pub async fn run(opts: &Options, cancel: &CancellationToken) -> Result<()> {
    let continent = inputs::resolve_continent(&opts.directory, &opts.jsonfile, opts.index)
        .context("resolving continent for this run")?;
    let span = tracing::info_span!("pipeline", continent = continent.code());
    let _guard = span.enter();

    if opts.hls {
        tracing::warn!("--hls requested but HLS-tile manifest emission is out of core scope; skipping");
    }

    let pass_filter = opts.passlist.as_deref().map(inputs::read_pass_list).transpose()?;

    check_cancelled(cancel, "before shapefile reading")?;
    let reader = confluence_shapefile::ShapefileReader::new();
    let (aggregated, granule_uris) = if opts.local || opts.simulated {
        let dir = opts
            .shapefiledir
            .as_deref()
            .context("--shapefiledir is required when reading locally or using a simulated credential path")?;
        let aggregated = {
            let span = tracing::info_span!("shapefile_reading");
            let _g = span.enter();
            reader.read_local(dir, continent.code(), SWORD_VERSION, pass_filter.as_deref())?
        };
        let mut uris: Vec<String> = aggregated.shapefile_stems.clone();
        confluence_catalog::sorting::natural_sort(&mut uris);
        (aggregated, uris)
    } else {
        let granule_uris = {
            let span = tracing::info_span!("granule_listing");
            let _g = span.enter();
            list_granules(opts, continent).await?
        };

        let broker = credential_broker(opts).await?;
        let aggregated = {
            let span = tracing::info_span!("shapefile_reading");
            let _g = span.enter();
            reader.read_all(&granule_uris, SWORD_VERSION, pass_filter.as_deref(), &broker).await?
        };
        (aggregated, granule_uris)
    };

    let reach_ids = match &opts.subsetfile {
        Some(path) => {
            let subset = inputs::read_reach_subset(path)?;
            let subset: std::collections::HashSet<_> = subset.into_iter().collect();
            aggregated.reach_ids.iter().copied().filter(|id| subset.contains(id)).collect::<Vec<_>>()
        }
        None => aggregated.reach_ids.clone(),
    };

    let mut cycle_indexer = confluence_shapefile::CycleIndexer::new();
    cycle_indexer.index_all(&aggregated.shapefile_stems);

    check_cancelled(cancel, "before reference database loading")?;
    let sword_filename = sword_filename(continent);
    let sos_filename = sos_filename(continent);
    let sword_path = opts.directory.join("sword").join(&sword_filename);

    let mut db = {
        let span = tracing::info_span!("reference_db_loading");
        let _g = span.enter();
        confluence_refdb::load(&sword_path.to_string_lossy()).with_context(|| format!("loading reference database {}", sword_path.display()))?
    };

    if let Some(patch_path) = &opts.swordpatch {
        let contents = std::fs::read_to_string(patch_path).with_context(|| format!("reading SWORD patch {}", patch_path.display()))?;
        confluence_refdb::apply_patch_file(&mut db, &contents)?;
    }

    let observed = ObservedReaches::new(reach_ids.iter().copied());

    let writer = ManifestWriter::new(opts.directory.clone());
    writer.write("basin", continent.code(), &confluence_manifest::basin_records(&reach_ids, &sword_filename, &sos_filename))?;
    writer.write("reaches", continent.code(), &confluence_manifest::reach_records(&reach_ids, &sword_filename, &sos_filename))?;
    writer.write("reach_node", continent.code(), &confluence_manifest::reach_node_records(&reach_ids, &aggregated.node_ids))?;
    writer.write("cycle_passes", continent.code(), &confluence_manifest::cycle_passes_json(cycle_indexer.cycle_pass_to_id()))?;
    writer.write("passes", continent.code(), &confluence_manifest::passes_json(cycle_indexer.id_to_cycle_pass()))?;
    writer.write("s3_list", continent.code(), &confluence_manifest::s3_list_json(&granule_uris))?;
    writer.write("s3_reach", continent.code(), &confluence_manifest::s3_reach_json(&aggregated.reach_to_granules))?;

    for profile in AlgorithmProfile::standard_profiles() {
        check_cancelled(cancel, "before set building")?;
        let span = tracing::info_span!("set_building", profile = %profile.name);
        let _g = span.enter();
        let cancelled = AtomicBool::new(cancel.is_cancelled());
        let sets = confluence_setbuilder::build_for_cancellable(&db, &observed, &profile, &cancelled);
        let kind = format!("{}sets", profile.name);
        writer.write(&kind, continent.code(), &confluence_manifest::set_records(&sets, &sword_filename, &sos_filename))?;
    }

    Ok(())
}

fn check_cancelled(cancel: &CancellationToken, stage: &str) -> Result<()> {
    if cancel.is_cancelled() {
        bail!("run cancelled {stage}");
    }
    Ok(())
}

async fn list_granules(opts: &Options, continent: Continent) -> Result<Vec<String>> {
    let ssm = ssm_client().await;
    let token = confluence_creds::ssm::get_token(&ssm).await.context("fetching the CMR bearer token from parameter store")?;

    let query = confluence_catalog::GranuleQuery {
        short_name: opts.shortname.clone(),
        provider: opts.provider.catalog_provider_name().to_string(),
        temporal_range: opts.temporalrange.clone(),
    };
    let lister = confluence_catalog::GranuleLister::new(Some(token));
    lister.list_granules(&query, continent).await.context("listing granules from the catalog")
}

async fn credential_broker(opts: &Options) -> Result<CredentialBroker> {
    let edl_username = std::env::var("EARTHDATA_USERNAME").context("EARTHDATA_USERNAME must be set to exchange credentials")?;
    let edl_password = std::env::var("EARTHDATA_PASSWORD").context("EARTHDATA_PASSWORD must be set to exchange credentials")?;
    let ssm_key_id = opts.ssmkey.clone().context("--ssmkey is required to persist refreshed credentials")?;

    let ssm = ssm_client().await;

    Ok(CredentialBroker::new(
        ssm,
        opts.provider.credential_endpoint().to_string(),
        edl_username,
        SecretString::from(edl_password),
        ssm_key_id,
    ))
}

async fn ssm_client() -> SsmClient {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    SsmClient::new(&aws_config)
}
