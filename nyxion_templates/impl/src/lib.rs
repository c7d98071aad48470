use std::sync::Arc;

use nyxion_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default)]
pub struct TemplateServiceImpl {
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        // input is escaped before rendering
        tera.autoescape_on(vec![]);

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use nyxion_templates_contracts::ContactNotificationTemplate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn contact_notification() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactNotificationTemplate {
                accent_color: "#6A5BF0".into(),
                name: "Max &amp; Co".into(),
                email: "max@example.com".into(),
                phone: Some("612 345 678".into()),
                service: "Consulta General".into(),
                message: "&lt;b&gt;Hola&lt;/b&gt;".into(),
            })
            .unwrap();

        // Assert
        assert!(result.contains(r#"<h2 style="color: #6A5BF0;">"#));
        assert!(result.contains("<p><strong>Nombre:</strong> Max &amp; Co</p>"));
        assert!(result.contains("<p><strong>Teléfono:</strong> 612 345 678</p>"));
        assert!(result.contains("<p><strong>Servicio:</strong> Consulta General</p>"));
        assert_eq!(
            result.matches("&lt;b&gt;Hola&lt;/b&gt;").count(),
            1,
            "escaped input must not be escaped again"
        );
    }

    #[test]
    fn contact_notification_without_phone() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactNotificationTemplate {
                accent_color: "#1B365D".into(),
                name: "Max".into(),
                email: "max@example.com".into(),
                phone: None,
                service: "Servicio de interés".into(),
                message: "Hola, ¿qué tal?".into(),
            })
            .unwrap();

        // Assert
        assert!(!result.contains("Teléfono"));
        assert!(result.contains("<p><strong>Email:</strong> max@example.com</p>"));
        assert!(result.contains("<p><strong>Servicio:</strong> Servicio de interés</p>"));
    }
}
