//! Grouping of noisy text samples by signature similarity.
//!
//! Each group keeps a representative [`Signature`]. A new sample joins the
//! group whose representative is similar to it and closest by token distance;
//! when no group is similar, the sample opens a new one. With
//! `refine_on_match` enabled the representative is refined with every sample
//! it absorbs, so volatile positions are masked as the group grows.
//!
//! `max_groups` bounds memory for long-running streams: once the limit is
//! reached, a sample that matches nothing takes the slot of the group with
//! the fewest hits (the oldest such group on ties).

use serde::Serialize;
use tracing::debug;

use crate::core::config::DedupeOptions;
use crate::core::errors::{Result, SigilError};
use crate::signature::Signature;

/// A cluster of samples sharing one representative signature.
#[derive(Debug, Clone)]
pub struct Group {
    representative: Signature,
    hits: usize,
}

impl Group {
    /// Signature every new sample is compared against
    pub fn representative(&self) -> &Signature {
        &self.representative
    }

    /// Number of samples assigned to this group, including the first
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Outcome of observing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Index of the group the sample was assigned to
    pub group: usize,
    /// Whether the sample opened a new group
    pub is_new: bool,
    /// Token distance to the representative before any refinement
    pub distance: usize,
    /// Whether the new group replaced an existing one to stay within `max_groups`
    pub evicted: bool,
}

/// Incremental de-duplicator over text samples.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    options: DedupeOptions,
    groups: Vec<Group>,
}

impl Deduplicator {
    /// Create an empty de-duplicator after validating the options.
    pub fn new(options: DedupeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            groups: Vec::new(),
        })
    }

    /// Options in effect
    pub fn options(&self) -> &DedupeOptions {
        &self.options
    }

    /// All groups, in creation order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing has been observed yet
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of samples observed
    pub fn observed(&self) -> usize {
        self.groups.iter().map(Group::hits).sum()
    }

    /// Assign a sample to a group, opening a new group when nothing matches.
    pub fn observe(&mut self, text: &str) -> Result<Observation> {
        let candidate = self.signature_for(text)?;

        if let Some((index, distance)) = self.closest_similar(&candidate) {
            let refine = self.options.refine_on_match;
            let group = &mut self.groups[index];
            if refine {
                group.representative.refine_with_mut(&candidate);
            }
            group.hits += 1;

            debug!(
                group = index,
                distance,
                hits = group.hits,
                wildcards = group.representative.wildcard_count(),
                "sample matched existing group"
            );
            return Ok(Observation {
                group: index,
                is_new: false,
                distance,
                evicted: false,
            });
        }

        let group = Group {
            representative: candidate,
            hits: 1,
        };

        if let Some(index) = self.eviction_slot() {
            debug!(
                group = index,
                evicted_hits = self.groups[index].hits,
                tokens = group.representative.len(),
                "sample replaced least used group"
            );
            self.groups[index] = group;
            return Ok(Observation {
                group: index,
                is_new: true,
                distance: 0,
                evicted: true,
            });
        }

        let index = self.groups.len();
        debug!(group = index, tokens = group.representative.len(), "sample opened new group");
        self.groups.push(group);

        Ok(Observation {
            group: index,
            is_new: true,
            distance: 0,
            evicted: false,
        })
    }

    /// Drop every group, keeping the options.
    pub fn clear(&mut self) {
        debug!(groups = self.groups.len(), "clearing deduplicator");
        self.groups.clear();
    }

    /// Find the group a sample would join, without recording it.
    pub fn classify(&self, text: &str) -> Result<Option<usize>> {
        let candidate = self.signature_for(text)?;
        Ok(self.closest_similar(&candidate).map(|(index, _)| index))
    }

    fn signature_for(&self, text: &str) -> Result<Signature> {
        let candidate = Signature::new(text, self.options.signature)?;
        if let Some(limit) = self.options.max_tokens {
            if candidate.len() > limit {
                return Err(SigilError::invalid_argument(
                    "text",
                    format!("{} tokens", candidate.len()),
                    format!("sample exceeds max_tokens ({limit})"),
                ));
            }
        }
        Ok(candidate)
    }

    /// Slot to overwrite when the group limit is reached.
    fn eviction_slot(&self) -> Option<usize> {
        let limit = self.options.max_groups?;
        if self.groups.len() < limit {
            return None;
        }
        self.groups
            .iter()
            .enumerate()
            .min_by_key(|&(index, group)| (group.hits, index))
            .map(|(index, _)| index)
    }

    /// Similar group with the smallest distance; the earliest group wins ties.
    fn closest_similar(&self, candidate: &Signature) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.representative.is_similar(candidate))
            .map(|(index, group)| (index, group.representative.distance(candidate)))
            .min_by_key(|&(index, distance)| (distance, index))
    }
}
