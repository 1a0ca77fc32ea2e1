use super::SentenceInfo;
use crate::summarize::document::Sentence;

/// Keeps the `count` best rated sentences and returns them in document order.
/// Ties in rating have no defined precedence.
pub fn select_top<'d, W>(
    mut infos: Vec<SentenceInfo<'d, W>>,
    count: usize,
) -> Vec<&'d Sentence<W>> {
    infos.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    infos.truncate(count);
    infos.sort_by_key(|info| info.order);
    infos.into_iter().map(|info| info.sentence).collect()
}
