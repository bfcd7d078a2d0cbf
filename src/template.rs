use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("URL template {template:?} has no {placeholder} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
}

/// Tile URL pattern with `{z}`, `{x}` and `{y}` placeholders.
///
/// The pattern is never modified; every call to [`UrlTemplate::url`] starts
/// from the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        for placeholder in ["{x}", "{y}"] {
            if !template.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    template,
                    placeholder,
                });
            }
        }
        Ok(Self { template })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn url(&self, zoom: u32, x: i64, y: i64) -> String {
        self.template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GIBS_URL_TEMPLATE;

    #[test]
    fn gibs_path_order_is_z_y_x() {
        let template = UrlTemplate::new(GIBS_URL_TEMPLATE).unwrap();
        let url = template.url(8, 129, 88);
        assert!(url.ends_with("/250m/8/88/129.jpg"), "{url}");
    }

    #[test]
    fn each_tile_gets_its_own_url() {
        let template = UrlTemplate::new("http://tiles/{z}/{y}/{x}.jpg").unwrap();
        assert_eq!(template.url(3, 1, 2), "http://tiles/3/2/1.jpg");
        assert_eq!(template.url(3, 4, 5), "http://tiles/3/5/4.jpg");
        assert_eq!(template.url(4, 1, 2), "http://tiles/4/2/1.jpg");
        assert_eq!(template.as_str(), "http://tiles/{z}/{y}/{x}.jpg");
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        let template = UrlTemplate::new("http://t/{z}/{x}/{y}?tile={z}-{x}-{y}").unwrap();
        assert_eq!(template.url(2, 0, 3), "http://t/2/0/3?tile=2-0-3");
    }

    #[test]
    fn zoom_placeholder_is_optional() {
        let template = UrlTemplate::new("http://t/fixed/{x}_{y}.png").unwrap();
        assert_eq!(template.url(9, 7, 1), "http://t/fixed/7_1.png");
    }

    #[test]
    fn rejects_templates_without_tile_coordinates() {
        assert_eq!(
            UrlTemplate::new("http://t/{z}/{y}.jpg"),
            Err(TemplateError::MissingPlaceholder {
                template: "http://t/{z}/{y}.jpg".to_string(),
                placeholder: "{x}",
            })
        );
        assert!(matches!(
            UrlTemplate::new("http://t/{z}/{x}.jpg"),
            Err(TemplateError::MissingPlaceholder { placeholder: "{y}", .. })
        ));
    }
}
