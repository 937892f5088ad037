// ── Channel / generation / plan / region selection ──
//
// Picks exactly one generation from the configured channel by comparing
// normalized catalog names against the desired generation. Plan type and
// region are the first entries the console returns; there is no ranking.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use c8ci_api::console_types::{CatalogEntry, Channel, ClusterParameters};

use crate::error::CoreError;

/// Literal token removed from generation names before comparison.
pub const GENERATION_PREFIX: &str = "Camunda ";

static GENERATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+gen\d+$").expect("generation suffix pattern is valid"));

/// Strip the `Camunda ` token and a trailing `+gen<N>` suffix.
///
/// `"Camunda 8.5+gen3"` becomes `"8.5"`. Names without a well-formed suffix
/// keep everything after prefix removal (`"Camunda 8.5+genX"` → `"8.5+genX"`).
pub fn normalize_generation_name(name: &str) -> String {
    let stripped = name.replace(GENERATION_PREFIX, "");
    GENERATION_SUFFIX.replace(&stripped, "").into_owned()
}

/// The resolved inputs for a cluster creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub channel: CatalogEntry,
    pub generation: CatalogEntry,
    pub plan: CatalogEntry,
    pub region: CatalogEntry,
    /// Generations whose normalized name matched the desired value.
    pub candidates: Vec<CatalogEntry>,
}

/// Find the channel whose name equals `channel_name` exactly.
pub fn find_channel<'a>(channels: &'a [Channel], channel_name: &str) -> Result<&'a Channel, CoreError> {
    channels
        .iter()
        .find(|channel| channel.name == channel_name)
        .ok_or_else(|| CoreError::ChannelNotFound {
            channel: channel_name.to_owned(),
        })
}

/// All generations whose normalized, non-empty name equals `desired`.
pub fn matching_generations(generations: &[CatalogEntry], desired: &str) -> Vec<CatalogEntry> {
    generations
        .iter()
        .filter(|entry| {
            let normalized = normalize_generation_name(&entry.name);
            !normalized.is_empty() && normalized == desired
        })
        .cloned()
        .collect()
}

/// Require exactly one generation matching `desired` in `channel`.
pub fn select_generation(channel: &Channel, desired: &str) -> Result<Vec<CatalogEntry>, CoreError> {
    let generations = channel.allowed_generations.as_deref().unwrap_or_default();
    let candidates = matching_generations(generations, desired);

    match candidates.len() {
        0 => Err(CoreError::NoMatchingGeneration {
            channel: channel.name.clone(),
            desired: desired.to_owned(),
        }),
        1 => Ok(candidates),
        _ => Err(CoreError::AmbiguousGeneration {
            desired: desired.to_owned(),
            candidates: candidates.into_iter().map(|entry| entry.name).collect(),
        }),
    }
}

/// First entry wins. No tie-break is applied.
fn first_entry(entries: Option<&Vec<CatalogEntry>>, none: CoreError) -> Result<CatalogEntry, CoreError> {
    entries.and_then(|list| list.first()).cloned().ok_or(none)
}

/// Resolve channel, generation, plan, and region from a parameters document.
pub fn resolve_selection(
    params: &ClusterParameters,
    channel_name: &str,
    desired: &str,
) -> Result<Selection, CoreError> {
    let channels = params
        .channels
        .as_deref()
        .ok_or_else(|| CoreError::MalformedResponse {
            message: "unexpected parameters response (no channels)".into(),
        })?;

    let channel = find_channel(channels, channel_name)?;
    info!(channel = %channel.name, uuid = %channel.uuid, "found channel");

    let candidates = select_generation(channel, desired)?;
    let generation = candidates
        .first()
        .cloned()
        .ok_or_else(|| CoreError::NoMatchingGeneration {
            channel: channel.name.clone(),
            desired: desired.to_owned(),
        })?;
    debug!(generation = %generation.name, "selected generation");

    let plan = first_entry(params.cluster_plan_types.as_ref(), CoreError::NoPlanTypes)?;
    let region = first_entry(params.regions.as_ref(), CoreError::NoRegions)?;

    Ok(Selection {
        channel: CatalogEntry {
            name: channel.name.clone(),
            uuid: channel.uuid.clone(),
        },
        generation,
        plan,
        region,
        candidates,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(name: &str, uuid: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            uuid: uuid.into(),
        }
    }

    fn params(generations: Vec<CatalogEntry>) -> ClusterParameters {
        ClusterParameters {
            channels: Some(vec![
                Channel {
                    name: "Alpha".into(),
                    uuid: "ch-alpha".into(),
                    allowed_generations: Some(vec![entry("Camunda 8.5+gen9", "alpha-85")]),
                },
                Channel {
                    name: "Stable".into(),
                    uuid: "ch-stable".into(),
                    allowed_generations: Some(generations),
                },
            ]),
            cluster_plan_types: Some(vec![entry("Trial", "plan-1"), entry("Prod", "plan-2")]),
            regions: Some(vec![entry("Belgium", "region-1"), entry("Iowa", "region-2")]),
        }
    }

    #[test]
    fn normalize_strips_prefix_and_generation_suffix() {
        assert_eq!(normalize_generation_name("Camunda 8.5+gen3"), "8.5");
        assert_eq!(normalize_generation_name("Camunda 8.6+gen12"), "8.6");
        assert_eq!(normalize_generation_name("Camunda 8.7.0-alpha1+gen1"), "8.7.0-alpha1");
    }

    #[test]
    fn normalize_leaves_names_without_suffix() {
        assert_eq!(normalize_generation_name("Camunda 8.5"), "8.5");
        assert_eq!(normalize_generation_name("Camunda 8.5+genX"), "8.5+genX");
        assert_eq!(normalize_generation_name("Camunda 8.5+gen3-patch"), "8.5+gen3-patch");
        assert_eq!(normalize_generation_name("8.5"), "8.5");
    }

    #[test]
    fn normalize_only_strips_trailing_suffix() {
        assert_eq!(normalize_generation_name("Camunda 8.5+gen3+gen4"), "8.5+gen3");
    }

    #[test]
    fn selects_single_exact_match() {
        let selection = resolve_selection(
            &params(vec![
                entry("Camunda 8.5+gen3", "gen-85"),
                entry("Camunda 8.6+gen1", "gen-86"),
            ]),
            "Stable",
            "8.5",
        )
        .unwrap();

        assert_eq!(selection.channel, entry("Stable", "ch-stable"));
        assert_eq!(selection.generation, entry("Camunda 8.5+gen3", "gen-85"));
        assert_eq!(selection.candidates, vec![entry("Camunda 8.5+gen3", "gen-85")]);
    }

    #[test]
    fn desired_must_match_whole_normalized_name() {
        let err = resolve_selection(
            &params(vec![entry("Camunda 8.55+gen1", "gen-855")]),
            "Stable",
            "8.5",
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::NoMatchingGeneration { .. }), "{err:?}");
    }

    #[test]
    fn zero_matches_is_fatal() {
        let err = resolve_selection(
            &params(vec![entry("Camunda 8.6+gen1", "gen-86")]),
            "Stable",
            "8.5",
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "No generations in Stable match '8.5'");
    }

    #[test]
    fn multiple_matches_list_every_candidate() {
        let err = resolve_selection(
            &params(vec![
                entry("Camunda 8.5+gen3", "gen-85a"),
                entry("Camunda 8.6+gen1", "gen-86"),
                entry("Camunda 8.5+gen4", "gen-85b"),
            ]),
            "Stable",
            "8.5",
        )
        .unwrap_err();

        match &err {
            CoreError::AmbiguousGeneration { candidates, .. } => {
                assert_eq!(candidates, &["Camunda 8.5+gen3", "Camunda 8.5+gen4"]);
            }
            other => panic!("expected AmbiguousGeneration, got {other:?}"),
        }
        assert!(err.to_string().contains("Camunda 8.5+gen3, Camunda 8.5+gen4"));
    }

    #[test]
    fn generations_from_other_channels_are_ignored() {
        let selection = resolve_selection(
            &params(vec![entry("Camunda 8.5+gen3", "gen-85")]),
            "Stable",
            "8.5",
        )
        .unwrap();

        assert_eq!(selection.candidates.len(), 1);
        assert_eq!(selection.generation.uuid, "gen-85");
    }

    #[test]
    fn missing_channel_is_fatal() {
        let err = resolve_selection(&params(vec![]), "Beta", "8.5").unwrap_err();
        assert!(matches!(err, CoreError::ChannelNotFound { ref channel } if channel == "Beta"));
    }

    #[test]
    fn missing_channels_field_is_malformed() {
        let doc = ClusterParameters {
            channels: None,
            cluster_plan_types: None,
            regions: None,
        };
        let err = resolve_selection(&doc, "Stable", "8.5").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }

    #[test]
    fn plan_and_region_take_first_entry() {
        let selection = resolve_selection(
            &params(vec![entry("Camunda 8.5+gen3", "gen-85")]),
            "Stable",
            "8.5",
        )
        .unwrap();

        assert_eq!(selection.plan, entry("Trial", "plan-1"));
        assert_eq!(selection.region, entry("Belgium", "region-1"));
    }

    #[test]
    fn empty_plan_or_region_list_is_fatal() {
        let mut doc = params(vec![entry("Camunda 8.5+gen3", "gen-85")]);
        doc.cluster_plan_types = Some(vec![]);
        assert!(matches!(
            resolve_selection(&doc, "Stable", "8.5").unwrap_err(),
            CoreError::NoPlanTypes
        ));

        let mut doc = params(vec![entry("Camunda 8.5+gen3", "gen-85")]);
        doc.regions = None;
        assert!(matches!(
            resolve_selection(&doc, "Stable", "8.5").unwrap_err(),
            CoreError::NoRegions
        ));
    }
}
