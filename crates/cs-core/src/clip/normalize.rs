use std::collections::HashMap;

use super::ClipItem;

/// Collapses items sharing the same content into the first occurrence.
///
/// The survivor keeps the highest frequency, is a favorite if any copy was,
/// and carries the union of all tags. Running it twice gives the same list.
pub fn collapse_duplicate_content(items: Vec<ClipItem>) -> Vec<ClipItem> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut out: Vec<ClipItem> = Vec::with_capacity(items.len());

    for item in items {
        match index.get(&item.content) {
            Some(&pos) => {
                let survivor = &mut out[pos];
                survivor.frequency = survivor.frequency.max(item.frequency);
                survivor.is_favorite |= item.is_favorite;
                survivor.merge_tags(item.tags);
            }
            None => {
                index.insert(item.content.clone(), out.len());
                out.push(item);
            }
        }
    }

    out
}
