/// Poster/profile rendition sizes offered by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W185,
    W342,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W185 => "w185",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

/// Full image URL for a provider path such as `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`
pub fn image_url(image_base_url: &str, size: ImageSize, path: Option<&str>) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}/{}",
        image_base_url.trim_end_matches('/'),
        size.as_str(),
        path.trim_start_matches('/')
    ))
}

/// Watch page for a video hosted on the video-sharing site
pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", urlencoding::encode(key))
}
