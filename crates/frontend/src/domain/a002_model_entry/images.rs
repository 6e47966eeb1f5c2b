//! Per-row image selection: validation, ordering, removal
//!
//! Generic over the file handle so the rules run without a browser; the UI
//! plugs in `web_sys::File`.

use contracts::shared::image_policy::{
    format_size_mb, is_allowed_image_type, MAX_IMAGES_PER_ENTRY, MAX_IMAGE_BYTES,
};
use thiserror::Error;

pub trait ImageFile: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn mime_type(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageBatchError {
    #[error("\"{name}\" is not a supported image type ({mime}). Allowed: JPG, PNG, WEBP, AVIF.")]
    UnsupportedType { name: String, mime: String },
    #[error("\"{name}\" is too large ({size_mb} MB). Maximum size is 10 MB per image.")]
    TooLarge { name: String, size_mb: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Every file was appended; keys in append order
    Added { keys: Vec<u64> },
    /// The selection hit the cap; `dropped` files past it were discarded
    Truncated { keys: Vec<u64>, dropped: usize },
}

impl AddOutcome {
    pub fn keys(&self) -> &[u64] {
        match self {
            AddOutcome::Added { keys } | AddOutcome::Truncated { keys, .. } => keys,
        }
    }

    pub fn warning(&self) -> Option<String> {
        match self {
            AddOutcome::Truncated { dropped, .. } => Some(format!(
                "You can upload a maximum of {} images per entry. {} extra image(s) were not added.",
                MAX_IMAGES_PER_ENTRY, dropped
            )),
            AddOutcome::Added { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<F> {
    /// Stable across removals, used to attach an async preview
    pub key: u64,
    pub file: F,
    /// Data URL once decoded
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSelection<F> {
    items: Vec<SelectedImage<F>>,
    next_key: u64,
}

impl<F> Default for ImageSelection<F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_key: 0,
        }
    }
}

impl<F: ImageFile> ImageSelection<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the whole batch first; one bad file rejects all of them.
    /// Past the cap the selection is truncated to the first files.
    pub fn add_files(&mut self, files: Vec<F>) -> Result<AddOutcome, ImageBatchError> {
        for file in &files {
            let mime = file.mime_type();
            if !is_allowed_image_type(&mime) {
                return Err(ImageBatchError::UnsupportedType {
                    name: file.name(),
                    mime: if mime.is_empty() { "unknown".to_string() } else { mime },
                });
            }
            if file.size() > MAX_IMAGE_BYTES {
                return Err(ImageBatchError::TooLarge {
                    name: file.name(),
                    size_mb: format_size_mb(file.size()),
                });
            }
        }

        let room = MAX_IMAGES_PER_ENTRY.saturating_sub(self.items.len());
        let dropped = files.len().saturating_sub(room);
        let mut keys = Vec::new();
        for file in files.into_iter().take(room) {
            let key = self.next_key;
            self.next_key += 1;
            self.items.push(SelectedImage {
                key,
                file,
                preview: None,
            });
            keys.push(key);
        }

        if dropped > 0 {
            Ok(AddOutcome::Truncated { keys, dropped })
        } else {
            Ok(AddOutcome::Added { keys })
        }
    }

    /// Removes by display position; later images shift down
    pub fn remove(&mut self, position: usize) -> Option<F> {
        (position < self.items.len()).then(|| self.items.remove(position).file)
    }

    /// Attaches a decoded preview. Ignored if the image was removed meanwhile.
    pub fn set_preview(&mut self, key: u64, data_url: String) -> bool {
        match self.items.iter_mut().find(|i| i.key == key) {
            Some(item) => {
                item.preview = Some(data_url);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[SelectedImage<F>] {
        &self.items
    }

    /// Files in submission order
    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.items.iter().map(|i| &i.file)
    }

    pub fn header_label(&self) -> String {
        format!("Selected Images ({}/{})", self.items.len(), MAX_IMAGES_PER_ENTRY)
    }
}

/// One preview line, e.g. `3. shelf.jpg` and `2.50 MB`
pub fn describe<F: ImageFile>(position: usize, file: &F) -> (String, String) {
    (
        format!("{}. {}", position + 1, file.name()),
        format!("{} MB", format_size_mb(file.size())),
    )
}

#[cfg(test)]
pub(crate) mod fake {
    use super::ImageFile;

    #[derive(Debug, Clone, PartialEq)]
    pub struct FakeFile {
        pub name: String,
        pub size: u64,
        pub mime: String,
    }

    impl FakeFile {
        pub fn jpeg(name: &str) -> Self {
            Self {
                name: name.to_string(),
                size: 1024,
                mime: "image/jpeg".to_string(),
            }
        }
    }

    impl ImageFile for FakeFile {
        fn name(&self) -> String {
            self.name.clone()
        }
        fn size(&self) -> u64 {
            self.size
        }
        fn mime_type(&self) -> String {
            self.mime.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeFile;
    use super::*;

    fn batch(prefix: &str, n: usize) -> Vec<FakeFile> {
        (0..n).map(|i| FakeFile::jpeg(&format!("{}{}.jpg", prefix, i))).collect()
    }

    #[test]
    fn test_seven_then_five_truncates_to_ten() {
        let mut sel = ImageSelection::new();
        assert_eq!(sel.add_files(batch("a", 7)).unwrap().warning(), None);

        let outcome = sel.add_files(batch("b", 5)).unwrap();
        assert!(matches!(outcome, AddOutcome::Truncated { dropped: 2, .. }));
        assert_eq!(outcome.keys().len(), 3);
        assert!(outcome.warning().is_some());
        assert_eq!(sel.len(), 10);
        assert_eq!(sel.items()[9].file.name, "b2.jpg");
        assert_eq!(sel.header_label(), "Selected Images (10/10)");
    }

    #[test]
    fn test_remove_shifts_later_images() {
        let mut sel = ImageSelection::new();
        sel.add_files(batch("a", 10)).unwrap();
        let removed = sel.remove(3).unwrap();
        assert_eq!(removed.name, "a3.jpg");
        assert_eq!(sel.len(), 9);
        assert_eq!(sel.items()[3].file.name, "a4.jpg");
        assert_eq!(sel.items()[8].file.name, "a9.jpg");
        assert!(sel.remove(9).is_none());
    }

    #[test]
    fn test_header_count_follows_removal() {
        let mut sel = ImageSelection::new();
        sel.add_files(batch("a", 10)).unwrap();
        assert_eq!(sel.header_label(), "Selected Images (10/10)");
        sel.remove(3);
        assert_eq!(sel.header_label(), "Selected Images (9/10)");
        let (line, _) = describe(3, &sel.items()[3].file);
        assert_eq!(line, "4. a4.jpg");
    }

    #[test]
    fn test_gif_rejects_whole_batch() {
        let mut sel = ImageSelection::new();
        sel.add_files(batch("a", 2)).unwrap();

        let mut files = batch("b", 2);
        files.push(FakeFile {
            name: "anim.gif".to_string(),
            size: 10,
            mime: "image/gif".to_string(),
        });
        let err = sel.add_files(files).unwrap_err();
        assert!(matches!(err, ImageBatchError::UnsupportedType { ref name, .. } if name == "anim.gif"));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut sel = ImageSelection::new();
        let big = FakeFile {
            name: "huge.png".to_string(),
            size: MAX_IMAGE_BYTES + 1,
            mime: "image/png".to_string(),
        };
        let err = sel.add_files(vec![big]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"huge.png\" is too large (10.00 MB). Maximum size is 10 MB per image."
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn test_preview_follows_key_not_position() {
        let mut sel = ImageSelection::new();
        let keys = sel.add_files(batch("a", 3)).unwrap().keys().to_vec();
        sel.remove(0);
        assert!(sel.set_preview(keys[2], "data:image/jpeg;base64,AAA".to_string()));
        assert_eq!(sel.items()[1].preview.as_deref(), Some("data:image/jpeg;base64,AAA"));
        assert!(!sel.set_preview(keys[0], "x".to_string()));
    }

    #[test]
    fn test_describe() {
        let file = FakeFile {
            name: "shelf.jpg".to_string(),
            size: 2_621_440,
            mime: "image/jpeg".to_string(),
        };
        assert_eq!(
            describe(2, &file),
            ("3. shelf.jpg".to_string(), "2.50 MB".to_string())
        );
    }
}
