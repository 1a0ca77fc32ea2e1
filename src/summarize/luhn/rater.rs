//! Chunk (cluster) detection and rating for a single sentence.
//!
//! A cluster opens at a significant word and records one marker per
//! following word (`true` for significant). It closes once its trailing
//! `max_gap_size` markers are all `false`; the next significant word then
//! opens a new cluster. A gap size of 0 never closes a cluster, so the first
//! significant word opens the only one.

use super::significant::SignificantStems;
use super::stem_word;
use crate::nlp::Stemmer;
use crate::summarize::document::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    InCluster,
}

/// Best cluster rating in the sentence, or 0 when it has no significant word.
pub fn rate_sentence<W, S>(
    words: &[W],
    significant: &SignificantStems,
    max_gap_size: usize,
    stemmer: &S,
) -> f64
where
    W: Word,
    S: Stemmer,
{
    find_clusters(words, significant, max_gap_size, stemmer)
        .iter()
        .map(|cluster| chunk_rating(cluster))
        .fold(0.0, f64::max)
}

pub(crate) fn find_clusters<W, S>(
    words: &[W],
    significant: &SignificantStems,
    max_gap_size: usize,
    stemmer: &S,
) -> Vec<Vec<bool>>
where
    W: Word,
    S: Stemmer,
{
    let mut clusters: Vec<Vec<bool>> = Vec::new();
    let mut state = ScanState::Scanning;

    for word in words {
        let is_significant = significant.contains(&stem_word(word, stemmer));
        match state {
            ScanState::Scanning if is_significant => {
                clusters.push(vec![true]);
                state = ScanState::InCluster;
            }
            ScanState::Scanning => continue,
            ScanState::InCluster => {
                if let Some(cluster) = clusters.last_mut() {
                    cluster.push(is_significant);
                }
            }
        }

        if clusters
            .last()
            .is_some_and(|cluster| gap_exceeded(cluster, max_gap_size))
        {
            state = ScanState::Scanning;
        }
    }

    clusters
}

fn gap_exceeded(cluster: &[bool], max_gap_size: usize) -> bool {
    max_gap_size > 0
        && cluster.len() >= max_gap_size
        && cluster[cluster.len() - max_gap_size..]
            .iter()
            .all(|significant| !significant)
}

/// `s² / w` over the cluster with trailing non-significant markers removed,
/// where `s` counts significant markers and `w` is the trimmed width. A lone
/// significant word rates 0.
///
/// # Panics
///
/// If the cluster has no significant marker. Clusters always open on a
/// significant word, so this is a construction bug.
pub fn chunk_rating(markers: &[bool]) -> f64 {
    let width = markers
        .iter()
        .rposition(|&significant| significant)
        .map_or(0, |last| last + 1);
    assert!(width > 0, "cluster is empty after trimming trailing gaps");

    let significant = markers[..width].iter().filter(|&&m| m).count();
    if significant == 1 {
        0.0
    } else {
        (significant * significant) as f64 / width as f64
    }
}
