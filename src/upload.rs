//! Upload hygiene: extension allow-list and filename sanitizing.

/// Video container extensions we accept, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];

/// Whether the filename carries an accepted video extension (case-insensitive).
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe basename: drop any path
/// components, keep `[A-Za-z0-9._-]`, replace everything else with `_`.
/// Returns an empty string when nothing usable remains.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name of only dots or underscores is as good as no name.
    if sanitized.chars().all(|c| matches!(c, '.' | '_')) {
        String::new()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_file("clip.mp4"));
        assert!(allowed_file("clip.avi"));
        assert!(allowed_file("clip.mov"));
        assert!(allowed_file("CLIP.MP4"));
        assert!(!allowed_file("clip.mkv"));
        assert!(!allowed_file("clip.webm"));
        assert!(!allowed_file("clip"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\videos\\clip.mp4"), "clip.mp4");
        assert_eq!(sanitize_filename("dir/clip.mp4"), "clip.mp4");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my clip (1).mp4"), "my_clip__1_.mp4");
        assert_eq!(sanitize_filename("clip.mp4"), "clip.mp4");
    }

    #[test]
    fn test_sanitize_rejects_empty_results() {
        assert_eq!(sanitize_filename("...."), "");
        assert_eq!(sanitize_filename("???"), "");
        assert_eq!(sanitize_filename(""), "");
    }
}
