//! Limits applied to images attached to a model entry

pub const MAX_IMAGES_PER_ENTRY: usize = 10;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/avif",
];

/// `accept` attribute for the file input
pub const IMAGE_INPUT_ACCEPT: &str = "image/*,.webp,.avif";

pub fn is_allowed_image_type(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&mime.as_str())
}

/// Size in megabytes with two decimals, e.g. `2.50`
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_types() {
        assert!(is_allowed_image_type("image/jpeg"));
        assert!(is_allowed_image_type("IMAGE/PNG"));
        assert!(is_allowed_image_type("image/avif"));
        assert!(!is_allowed_image_type("image/gif"));
        assert!(!is_allowed_image_type(""));
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(0), "0.00");
        assert_eq!(format_size_mb(MAX_IMAGE_BYTES), "10.00");
        assert_eq!(format_size_mb(2_621_440), "2.50");
    }
}
