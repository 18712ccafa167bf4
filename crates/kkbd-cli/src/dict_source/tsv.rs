use super::DictSource;

/// Tab-separated lines: `key<TAB>surface1<TAB>surface2...`, `#` comments.
pub struct TsvSource;

impl DictSource for TsvSource {
    fn is_comment(&self, line: &str) -> bool {
        line.starts_with('#')
    }

    fn parse_line(&self, line: &str) -> Option<(String, Vec<String>)> {
        let mut fields = line.split('\t');
        let key = fields.next()?.trim();
        let mut surfaces: Vec<String> = Vec::new();
        for field in fields {
            let field = field.trim();
            if !field.is_empty() && !surfaces.iter().any(|s| s == field) {
                surfaces.push(field.to_string());
            }
        }
        Some((key.to_string(), surfaces))
    }
}
