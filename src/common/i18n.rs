// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "pt";

// Catálogo de mensagens por idioma. Chaves ausentes caem no idioma padrão
// e, em último caso, na própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("pt", HashMap::from(PT));
        catalogs.insert("en", HashMap::from(EN));
        Self { catalogs }
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.catalogs.get(lang).and_then(|c| c.get(key)).copied()
    }
}

const PT: [(&str, &str); 18] = [
    ("validation.failed", "Um ou mais campos são inválidos."),
    ("auth.email_exists", "Usuário já existe."),
    ("auth.invalid_credentials", "Credenciais inválidas."),
    ("auth.access_expired", "Acesso expirado."),
    ("auth.unauthenticated", "Faça login para continuar."),
    ("auth.forbidden", "Você não tem acesso a este recurso."),
    ("resource.not_found", "Registro não encontrado."),
    ("lookup.not_found", "CNPJ não encontrado na base de dados da BrasilAPI."),
    ("lookup.failure", "Erro ao consultar serviço externo"),
    ("internal.unexpected", "Ocorreu um erro inesperado."),
    ("field.required", "Campo obrigatório."),
    ("field.invalid_date", "Data inválida (use AAAA-MM-DD)."),
    ("field.invalid_time", "Horário inválido (use HH:MM)."),
    ("field.min_days", "A validade deve ser de pelo menos 1 dia."),
    ("field.invalid_cnpj", "Por favor, digite um CNPJ para buscar."),
    ("field.missing_location", "Informe a localização ou salve uma antes."),
    ("field.invalid_latitude", "Latitude inválida."),
    ("field.invalid_longitude", "Longitude inválida."),
];

const EN: [(&str, &str); 18] = [
    ("validation.failed", "One or more fields are invalid."),
    ("auth.email_exists", "User already exists."),
    ("auth.invalid_credentials", "Invalid credentials."),
    ("auth.access_expired", "Access expired."),
    ("auth.unauthenticated", "Please log in to continue."),
    ("auth.forbidden", "You do not have access to this resource."),
    ("resource.not_found", "Record not found."),
    ("lookup.not_found", "CNPJ not found in the BrasilAPI database."),
    ("lookup.failure", "External lookup failed"),
    ("internal.unexpected", "An unexpected error occurred."),
    ("field.required", "This field is required."),
    ("field.invalid_date", "Invalid date (use YYYY-MM-DD)."),
    ("field.invalid_time", "Invalid time (use HH:MM)."),
    ("field.min_days", "Validity must be at least 1 day."),
    ("field.invalid_cnpj", "Please enter a CNPJ to search."),
    ("field.missing_location", "Provide coordinates or save a location first."),
    ("field.invalid_latitude", "Invalid latitude."),
    ("field.invalid_longitude", "Invalid longitude."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "auth.access_expired"), "Acesso expirado.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "nope.nothing"), "nope.nothing");
    }
}
