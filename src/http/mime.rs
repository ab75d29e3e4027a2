//! Content-type selection by file suffix.

/// Used when no suffix in [`CONTENT_TYPES`] matches.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Suffix to content-type mappings, tested in order; the first match wins.
pub const CONTENT_TYPES: &[(&str, &str)] = &[
    // video containers and segments
    (".mp4", "video/mp4"),
    (".webm", "video/webm"),
    (".m4s", "video/iso.segment"),
    (".m4v", "video/mp4"),
    (".m4a", "audio/mp4"),
    // adaptive streaming manifests
    (".mpd", "application/dash+xml"),
    (".m3u8", "application/vnd.apple.mpegurl"),
    // web assets
    (".html", "text/html"),
    (".js", "application/javascript"),
    (".css", "text/css"),
    (".json", "application/json"),
    // images
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".txt", "text/plain"),
];

/// Picks the content type for a resolved path.
///
/// Matching is a plain "ends with" on the whole path, so the table order is
/// the only tie-break.
///
/// ```
/// # use vidstream::http::mime::select_content_type;
/// assert_eq!(select_content_type("seg-12.m4s"), "video/iso.segment");
/// assert_eq!(select_content_type("data.bin"), "application/octet-stream");
/// ```
pub fn select_content_type(path: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
