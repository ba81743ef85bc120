/// The working set of user-selected images
///
/// Owns the selected files, their thumbnails, and the display order the
/// rest of the workflow consumes: preview and render requests upload files
/// in exactly the order held here.

use crate::collage::metadata;
use iced::widget::image::Handle;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Bulk removal never drops the selection below this many images
pub const MIN_IMAGES: usize = 2;

/// A file as it comes out of the picker dialog
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Filesystem modified time, the fallback when no capture time is embedded
    pub modified_ms: i64,
}

/// One selected image in the working set
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Unique within the app session
    pub id: u64,
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Thumbnail handle for the upload panel
    pub thumbnail: Handle,
    /// Best-available capture time (EXIF, else file modified time)
    pub shot_time_ms: i64,
}

/// How the selection is ordered for display and upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingMode {
    #[default]
    Chronological,
    Random,
}

impl OrderingMode {
    pub const ALL: [OrderingMode; 2] = [OrderingMode::Chronological, OrderingMode::Random];
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingMode::Chronological => write!(f, "Chronological"),
            OrderingMode::Random => write!(f, "Random"),
        }
    }
}

/// The selection itself. All mutation goes through methods so the active
/// ordering is reapplied consistently.
#[derive(Debug, Default)]
pub struct Selection {
    images: Vec<SelectedImage>,
    ordering: OrderingMode,
    next_id: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[SelectedImage] {
        &self.images
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn ordering(&self) -> OrderingMode {
        self.ordering
    }

    /// Total payload size in MB, two decimals, floored at 0.01 while
    /// anything is selected (matches the upload panel's stats line)
    pub fn total_size_mb(&self) -> f64 {
        if self.images.is_empty() {
            return 0.0;
        }
        let bytes: usize = self.images.iter().map(|img| img.bytes.len()).sum();
        let mb = (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
        mb.max(0.01)
    }

    /// `(name, bytes)` pairs in display order, for compression input and
    /// full-resolution uploads
    pub fn original_files(&self) -> Vec<(String, Vec<u8>)> {
        self.images
            .iter()
            .map(|img| (img.file_name.clone(), img.bytes.clone()))
            .collect()
    }

    /// Add freshly picked files. `append` merges into the existing
    /// selection (the grid advisor's "add N photos" path); otherwise the
    /// prior selection is replaced. The active ordering is reapplied.
    pub fn add_files(&mut self, files: Vec<PickedFile>, append: bool, rng: &mut impl Rng) {
        if files.is_empty() {
            return;
        }
        if !append {
            self.images.clear();
        }
        for file in files {
            let id = self.next_id;
            self.next_id += 1;
            let shot_time_ms =
                metadata::shot_time_from_bytes(&file.bytes).unwrap_or(file.modified_ms);
            let thumbnail = Handle::from_bytes(file.bytes.clone());
            self.images.push(SelectedImage {
                id,
                file_name: file.name,
                bytes: file.bytes,
                thumbnail,
                shot_time_ms,
            });
        }
        self.apply_ordering(rng);
    }

    /// Switch ordering mode and reapply it
    pub fn set_ordering(&mut self, ordering: OrderingMode, rng: &mut impl Rng) {
        self.ordering = ordering;
        self.apply_ordering(rng);
    }

    /// Remove a single image by id
    pub fn remove(&mut self, id: u64) {
        self.images.retain(|img| img.id != id);
    }

    /// Remove up to `n` images from the tail of the current order, but
    /// never below the two-image minimum. Returns how many were removed.
    pub fn remove_from_tail(&mut self, n: usize) -> usize {
        let removable = self.images.len().saturating_sub(MIN_IMAGES);
        let to_remove = n.min(removable);
        let keep = self.images.len() - to_remove;
        self.images.truncate(keep);
        to_remove
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    fn apply_ordering(&mut self, rng: &mut impl Rng) {
        match self.ordering {
            OrderingMode::Chronological => {
                // Stable sort: equal timestamps keep their relative order
                self.images.sort_by_key(|img| img.shot_time_ms);
            }
            OrderingMode::Random => {
                // Fisher-Yates via rand
                self.images.shuffle(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn picked(name: &str, modified_ms: i64) -> PickedFile {
        PickedFile {
            name: name.to_string(),
            bytes: name.as_bytes().to_vec(),
            modified_ms,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn ids(selection: &Selection) -> Vec<u64> {
        selection.images().iter().map(|img| img.id).collect()
    }

    fn names(selection: &Selection) -> Vec<&str> {
        selection
            .images()
            .iter()
            .map(|img| img.file_name.as_str())
            .collect()
    }

    #[test]
    fn test_chronological_order_is_monotonic() {
        let mut selection = Selection::new();
        selection.add_files(
            vec![picked("c", 3000), picked("a", 1000), picked("b", 2000)],
            false,
            &mut rng(),
        );
        assert_eq!(names(&selection), vec!["a", "b", "c"]);
        let times: Vec<i64> = selection
            .images()
            .iter()
            .map(|img| img.shot_time_ms)
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_chronological_order_is_stable_for_ties() {
        let mut selection = Selection::new();
        selection.add_files(
            vec![picked("first", 1000), picked("second", 1000)],
            false,
            &mut rng(),
        );
        assert_eq!(names(&selection), vec!["first", "second"]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut selection = Selection::new();
        let files: Vec<PickedFile> = (0..20).map(|i| picked(&format!("img{i}"), i)).collect();
        selection.add_files(files, false, &mut rng());

        let mut before = ids(&selection);
        selection.set_ordering(OrderingMode::Random, &mut rng());
        let mut after = ids(&selection);

        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_replace_discards_previous_selection() {
        let mut selection = Selection::new();
        selection.add_files(vec![picked("old1", 1), picked("old2", 2)], false, &mut rng());
        selection.add_files(vec![picked("new", 3)], false, &mut rng());
        assert_eq!(names(&selection), vec!["new"]);
    }

    #[test]
    fn test_append_merges_and_reorders() {
        let mut selection = Selection::new();
        selection.add_files(vec![picked("b", 2000)], false, &mut rng());
        selection.add_files(vec![picked("a", 1000)], true, &mut rng());
        // Appended file sorts in chronologically
        assert_eq!(names(&selection), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_single_image() {
        let mut selection = Selection::new();
        selection.add_files(
            vec![picked("a", 1), picked("b", 2), picked("c", 3)],
            false,
            &mut rng(),
        );
        let victim = selection.images()[1].id;
        selection.remove(victim);
        assert_eq!(names(&selection), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_from_tail_respects_minimum() {
        let mut selection = Selection::new();
        selection.add_files(
            (0..5).map(|i| picked(&format!("img{i}"), i)).collect(),
            false,
            &mut rng(),
        );

        // Asking for more than count - 2 only removes down to the minimum
        let removed = selection.remove_from_tail(100);
        assert_eq!(removed, 3);
        assert_eq!(selection.count(), MIN_IMAGES);

        // At the minimum, nothing more comes off
        assert_eq!(selection.remove_from_tail(1), 0);
        assert_eq!(selection.count(), MIN_IMAGES);
    }

    #[test]
    fn test_remove_from_tail_takes_the_tail_of_the_current_order() {
        let mut selection = Selection::new();
        selection.add_files(
            vec![picked("a", 1), picked("b", 2), picked("c", 3), picked("d", 4)],
            false,
            &mut rng(),
        );
        selection.remove_from_tail(2);
        assert_eq!(names(&selection), vec!["a", "b"]);
    }

    #[test]
    fn test_total_size_mb_has_a_floor() {
        let mut selection = Selection::new();
        assert_eq!(selection.total_size_mb(), 0.0);

        selection.add_files(vec![picked("tiny", 1), picked("tiny2", 2)], false, &mut rng());
        assert_eq!(selection.total_size_mb(), 0.01);
    }

    #[test]
    fn test_ids_are_unique_across_batches() {
        let mut selection = Selection::new();
        selection.add_files(vec![picked("a", 1), picked("b", 2)], false, &mut rng());
        selection.add_files(vec![picked("c", 3)], true, &mut rng());
        let mut seen = ids(&selection);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }
}
