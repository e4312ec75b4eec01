// src/common/text.rs
//
// Pequenos utilitários de texto: telefones, CNPJ, horários e o link de WhatsApp.

use chrono::NaiveDate;

const WHATSAPP_BASE: &str = "https://wa.me/55";

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formata um celular com 11 dígitos como `(DD) NNNNN-NNNN`.
/// Até 11 dígitos sem o formato completo, devolve só os dígitos; acima disso
/// mantém o texto original.
pub fn format_whatsapp(phone: &str) -> String {
    let digits = digits_only(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        n if n < 11 => digits,
        _ => phone.to_string(),
    }
}

/// Link `wa.me` com mensagem pré-preenchida. `None` se não houver dígitos.
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let digits = digits_only(phone);
    if digits.is_empty() {
        return None;
    }
    Some(format!(
        "{WHATSAPP_BASE}{digits}?text={}",
        urlencoding::encode(message)
    ))
}

/// "HH:MM" -> minutos desde a meia-noite.
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (h, m) = value.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_eleven_digit_mobile_numbers() {
        assert_eq!(format_whatsapp("11999998888"), "(11) 99999-8888");
        assert_eq!(format_whatsapp("(11) 99999-8888"), "(11) 99999-8888");
        assert_eq!(format_whatsapp("1133334444"), "1133334444");
        assert_eq!(format_whatsapp("+55 11 99999-8888"), "+55 11 99999-8888");
    }

    #[test]
    fn builds_whatsapp_link_with_country_code_and_encoded_text() {
        let link = whatsapp_link("(11) 98765-4321", "Olá Ana!").unwrap();
        assert_eq!(link, "https://wa.me/5511987654321?text=Ol%C3%A1%20Ana%21");
        assert!(whatsapp_link("sem telefone", "oi").is_none());
    }

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_hhmm("09:00"), Some(540));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("9h"), None);
    }
}
