// File: form-guard/core/src/config.rs
// Purpose: FormGuard configuration (element ids, endpoint, rules, messages)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::toast::ToastTimings;

/// FormGuard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub selectors: Selectors,

    /// Path the availability check is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Field names that must not be blank on submit, checked in order
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,

    /// Exact number of digits a phone number must have
    #[serde(default = "default_phone_digits")]
    pub phone_digits: usize,

    #[serde(default)]
    pub timings: ToastTimings,

    #[serde(default)]
    pub messages: Messages,

    /// Maximum level forwarded to the browser console
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the guarded controls live in the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default = "default_form_id")]
    pub form_id: String,

    #[serde(default = "default_email_id")]
    pub email_id: String,

    #[serde(default = "default_password_id")]
    pub password_id: String,

    /// Icon swapped by the password visibility toggle
    #[serde(default = "default_eye_icon_id")]
    pub eye_icon_id: String,

    #[serde(default = "default_phone_id")]
    pub phone_id: String,

    /// CSS selectors of the fields restricted to digits
    #[serde(default = "default_numeric_fields")]
    pub numeric_fields: Vec<String>,

    #[serde(default = "default_document_type_name")]
    pub document_type_name: String,

    /// Radio group name of the support type
    #[serde(default = "default_support_type_name")]
    pub support_type_name: String,

    #[serde(default = "default_terms_id")]
    pub terms_id: String,

    /// Container of server-rendered flash messages
    #[serde(default = "default_flash_container_id")]
    pub flash_container_id: String,
}

/// User-facing texts
///
/// `{field}` and `{digits}` are substituted where noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_email_format")]
    pub email_format: String,

    #[serde(default = "default_email_taken")]
    pub email_taken: String,

    #[serde(default = "default_email_check_failed")]
    pub email_check_failed: String,

    #[serde(default = "default_password_weak")]
    pub password_weak: String,

    /// Uses `{field}`
    #[serde(default = "default_required_field")]
    pub required_field: String,

    #[serde(default = "default_document_type")]
    pub document_type: String,

    /// Uses `{digits}`
    #[serde(default = "default_phone_length")]
    pub phone_length: String,

    #[serde(default = "default_support_type")]
    pub support_type: String,

    #[serde(default = "default_terms")]
    pub terms: String,
}

impl GuardConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GuardConfig = toml::from_str(content).context("Invalid FormGuard TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no form could satisfy
    pub fn validate(&self) -> Result<()> {
        if self.phone_digits == 0 {
            anyhow::bail!("phone_digits must be greater than zero");
        }
        if self.endpoint.trim().is_empty() {
            anyhow::bail!("endpoint must not be empty");
        }
        if self.timings.hide_after_ms <= self.timings.show_delay_ms {
            anyhow::bail!(
                "timings.hide_after_ms ({}) must be greater than timings.show_delay_ms ({})",
                self.timings.hide_after_ms,
                self.timings.show_delay_ms
            );
        }
        self.max_log_level()?;
        Ok(())
    }

    pub fn max_log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", self.log_level))
    }
}

impl Messages {
    pub fn required_field_for(&self, label: &str) -> String {
        self.required_field.replace("{field}", label)
    }

    pub fn phone_length_for(&self, digits: usize) -> String {
        self.phone_length.replace("{digits}", &digits.to_string())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            endpoint: default_endpoint(),
            required_fields: default_required_fields(),
            phone_digits: default_phone_digits(),
            timings: ToastTimings::default(),
            messages: Messages::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            email_id: default_email_id(),
            password_id: default_password_id(),
            eye_icon_id: default_eye_icon_id(),
            phone_id: default_phone_id(),
            numeric_fields: default_numeric_fields(),
            document_type_name: default_document_type_name(),
            support_type_name: default_support_type_name(),
            terms_id: default_terms_id(),
            flash_container_id: default_flash_container_id(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            email_format: default_email_format(),
            email_taken: default_email_taken(),
            email_check_failed: default_email_check_failed(),
            password_weak: default_password_weak(),
            required_field: default_required_field(),
            document_type: default_document_type(),
            phone_length: default_phone_length(),
            support_type: default_support_type(),
            terms: default_terms(),
        }
    }
}

// Default values
fn default_endpoint() -> String {
    "/registro_emprendedor".to_string()
}

fn default_required_fields() -> Vec<String> {
    [
        "nombre_completo",
        "correo",
        "contrasena",
        "numero_documento",
        "numero_celular",
        "programa_formacion",
        "titulo_proyecto",
        "descripcion_proyecto",
        "relacion_sector",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_phone_digits() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_form_id() -> String {
    "registro-emprendedor-form".to_string()
}

fn default_email_id() -> String {
    "correo-emprendedor".to_string()
}

fn default_password_id() -> String {
    "contrasena-emprendedor".to_string()
}

fn default_eye_icon_id() -> String {
    "eye-icon-emprendedor".to_string()
}

fn default_phone_id() -> String {
    "celular-emprendedor".to_string()
}

fn default_numeric_fields() -> Vec<String> {
    vec![
        "#celular-emprendedor".to_string(),
        "input[name=\"numero_documento\"]".to_string(),
    ]
}

fn default_document_type_name() -> String {
    "tipo_documento".to_string()
}

fn default_support_type_name() -> String {
    "tipo_apoyo".to_string()
}

fn default_terms_id() -> String {
    "terminos-emprendedor".to_string()
}

fn default_flash_container_id() -> String {
    "flash-messages".to_string()
}

fn default_email_format() -> String {
    "El formato del correo no es válido. Por favor, ingrese un correo válido.".to_string()
}

fn default_email_taken() -> String {
    "El correo electrónico ya está en uso.".to_string()
}

fn default_email_check_failed() -> String {
    "No se pudo verificar el correo en este momento. Inténtalo de nuevo.".to_string()
}

fn default_password_weak() -> String {
    "La contraseña debe tener 8+ caracteres, mayúscula, minúscula, número y un símbolo (!@#$%^&*._-)."
        .to_string()
}

fn default_required_field() -> String {
    "El campo \"{field}\" no puede estar vacío.".to_string()
}

fn default_document_type() -> String {
    "Debes seleccionar un tipo de documento.".to_string()
}

fn default_phone_length() -> String {
    "El número de celular debe tener exactamente {digits} dígitos.".to_string()
}

fn default_support_type() -> String {
    "Debes seleccionar un tipo de apoyo que buscas.".to_string()
}

fn default_terms() -> String {
    "Debes aceptar los Términos y Condiciones para continuar.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GuardConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint, "/registro_emprendedor");
        assert_eq!(config.phone_digits, 10);
        assert_eq!(config.required_fields.len(), 9);
        assert_eq!(config.required_fields[0], "nombre_completo");
        assert_eq!(config.selectors.form_id, "registro-emprendedor-form");
        assert_eq!(config.timings.hide_after_ms, 5000);
        assert_eq!(config.max_log_level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_override() {
        let config = GuardConfig::from_toml_str(
            r#"
            endpoint = "/api/check"
            log_level = "debug"

            [selectors]
            form_id = "signup"

            [timings]
            hide_after_ms = 100

            [messages]
            terms = "Accept the terms"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "/api/check");
        assert_eq!(config.selectors.form_id, "signup");
        assert_eq!(config.selectors.email_id, "correo-emprendedor");
        assert_eq!(config.timings.hide_after_ms, 100);
        assert_eq!(config.timings.show_delay_ms, 10);
        assert_eq!(config.messages.terms, "Accept the terms");
        assert_eq!(config.max_log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(GuardConfig::from_toml_str("phone_digits = 0").is_err());
        assert!(GuardConfig::from_toml_str("endpoint = \"  \"").is_err());
        assert!(GuardConfig::from_toml_str("log_level = \"loud\"").is_err());
        assert!(GuardConfig::from_toml_str("phone_digits = \"ten\"").is_err());
    }

    #[test]
    fn test_toast_must_show_before_hiding() {
        let same = GuardConfig::from_toml_str(
            "[timings]\nshow_delay_ms = 50\nhide_after_ms = 50",
        );
        assert!(same.is_err());

        let inverted = GuardConfig::from_toml_str("[timings]\nhide_after_ms = 5");
        assert!(inverted.is_err());

        let ok = GuardConfig::from_toml_str("[timings]\nhide_after_ms = 11").unwrap();
        assert_eq!(ok.timings.show_delay_ms, 10);
    }

    #[test]
    fn test_message_templates() {
        let messages = Messages::default();
        assert_eq!(
            messages.required_field_for("Nombre completo"),
            "El campo \"Nombre completo\" no puede estar vacío."
        );
        assert_eq!(
            messages.phone_length_for(10),
            "El número de celular debe tener exactamente 10 dígitos."
        );
    }
}
