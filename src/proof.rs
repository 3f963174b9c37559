const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// What a proof link points at. Rules are checked in declaration order and
/// the first match wins, so an Instagram URL ending in `.jpg` is `Instagram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofKind {
    Instagram,
    Strava,
    External,
    Video,
    Image,
    Pdf,
    OtherFile,
}

impl ProofKind {
    pub fn is_local(self) -> bool {
        matches!(
            self,
            ProofKind::Video | ProofKind::Image | ProofKind::Pdf | ProofKind::OtherFile
        )
    }
}

pub fn classify(lien: &str) -> ProofKind {
    if lien.contains("instagram.com") {
        ProofKind::Instagram
    } else if lien.contains("strava.com/athletes/") {
        ProofKind::Strava
    } else if lien.starts_with("http") {
        ProofKind::External
    } else if has_extension(lien, VIDEO_EXTENSIONS) {
        ProofKind::Video
    } else if has_extension(lien, IMAGE_EXTENSIONS) {
        ProofKind::Image
    } else if has_extension(lien, PDF_EXTENSIONS) {
        ProofKind::Pdf
    } else {
        ProofKind::OtherFile
    }
}

fn has_extension(lien: &str, extensions: &[&str]) -> bool {
    lien.rsplit_once('.')
        .map(|(_, ext)| {
            extensions
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}
