use super::DictSource;

/// SKK-JISYO lines: `key /cand1/cand2;annotation/`.
///
/// Annotations after `;` are dropped. Okuri blocks such as `/[く/書/]/`
/// repeat candidates already listed for the key and are skipped.
pub struct SkkSource;

impl DictSource for SkkSource {
    fn is_comment(&self, line: &str) -> bool {
        line.starts_with(';')
    }

    fn parse_line(&self, line: &str) -> Option<(String, Vec<String>)> {
        let (key, rest) = line.split_once(' ')?;
        let body = rest.trim_start().strip_prefix('/')?;

        let mut surfaces: Vec<String> = Vec::new();
        let mut in_block = false;
        for field in body.split('/') {
            if in_block {
                in_block = field != "]";
                continue;
            }
            if field.starts_with('[') {
                in_block = true;
                continue;
            }
            let surface = field.split(';').next().unwrap_or_default();
            if !surface.is_empty() && !surfaces.iter().any(|s| s == surface) {
                surfaces.push(surface.to_string());
            }
        }
        Some((key.to_string(), surfaces))
    }
}
