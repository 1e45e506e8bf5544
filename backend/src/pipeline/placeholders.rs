//! The placeholder vocabulary understood by term templates and the
//! construction of its replacement map for one request.

use crate::pipeline::embed::embed_attachment;
use crate::pipeline::submission::FormSubmission;
use crate::pipeline::substitute::PlaceholderMap;
use chrono::{FixedOffset, NaiveDate, Utc};
use common::model::condominium::Condominium;
use common::requests::fields;

pub const CONDOMINIUM: &str = "{{condominio}}";
pub const CONDOMINIUM_TAX_ID: &str = "{{cnpj_condominio}}";
pub const CONDOMINIUM_ADDRESS: &str = "{{endereco_cond}}";
pub const CONDOMINIUM_NEIGHBORHOOD: &str = "{{bairro_cond}}";
pub const CONDOMINIUM_CITY: &str = "{{cidade_cond}}";
pub const REPRESENTATIVE: &str = "{{sindico}}";
pub const DEBTOR: &str = "{{devedor}}";
pub const DEBTOR_TAX_ID: &str = "{{cpf}}";
pub const DEBTOR_ADDRESS: &str = "{{endereco_devedor}}";
pub const DEBTOR_PHONE: &str = "{{telefone}}";
pub const DEBTOR_EMAIL: &str = "{{email}}";
pub const TOTAL_AMOUNT: &str = "{{valor_total}}";
pub const PAYMENT_METHOD: &str = "{{forma_pagamento}}";
/// Upper-case city token used in the signature line.
pub const CITY: &str = "{{CIDADE}}";
pub const CURRENT_DATE: &str = "{{DATA_DIA}}";
pub const QUOTA_IMAGE: &str = "{{IMAGEM_COTAS}}";
pub const CALCULATION_IMAGE: &str = "{{IMAGEM_CALCULO}}";

/// Amount printed when the form leaves the total blank.
pub const DEFAULT_TOTAL_AMOUNT: &str = "0,00";

/// America/Sao_Paulo has been UTC-3 all year since 2019.
const SAO_PAULO_OFFSET_SECS: i32 = 3 * 3600;

pub fn today_in_sao_paulo() -> NaiveDate {
    let now = Utc::now();
    match FixedOffset::west_opt(SAO_PAULO_OFFSET_SECS) {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.date_naive(),
    }
}

/// `dd/mm/yyyy`, the pt-BR short date.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Escapes text for insertion into HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn text(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

/// Builds the replacement map for every token of the vocabulary.
///
/// Every token gets an entry; absent data maps to `""` (or to
/// [`DEFAULT_TOTAL_AMOUNT`] for the total). Text is HTML-escaped, while the
/// image tokens receive `data:` URIs meant for `src` attributes.
pub fn build_placeholders(
    form: &FormSubmission,
    condominium: &Condominium,
    today: NaiveDate,
) -> PlaceholderMap {
    let mut map = PlaceholderMap::new();

    map.insert(CONDOMINIUM, text(condominium.name.as_deref()));
    map.insert(CONDOMINIUM_TAX_ID, text(condominium.tax_id.as_deref()));
    map.insert(CONDOMINIUM_ADDRESS, text(condominium.address.as_deref()));
    map.insert(
        CONDOMINIUM_NEIGHBORHOOD,
        text(condominium.neighborhood.as_deref()),
    );
    map.insert(CONDOMINIUM_CITY, text(condominium.city.as_deref()));
    map.insert(REPRESENTATIVE, text(condominium.representative.as_deref()));

    map.insert(DEBTOR, text(form.field(fields::DEBTOR)));
    map.insert(DEBTOR_TAX_ID, text(form.field(fields::DEBTOR_TAX_ID)));
    map.insert(DEBTOR_ADDRESS, text(form.field(fields::DEBTOR_ADDRESS)));
    map.insert(DEBTOR_PHONE, text(form.field(fields::DEBTOR_PHONE)));
    map.insert(DEBTOR_EMAIL, text(form.field(fields::DEBTOR_EMAIL)));
    map.insert(
        TOTAL_AMOUNT,
        text(Some(
            form.field(fields::TOTAL_AMOUNT)
                .unwrap_or(DEFAULT_TOTAL_AMOUNT),
        )),
    );
    map.insert(PAYMENT_METHOD, text(form.field(fields::PAYMENT_METHOD)));

    map.insert(CITY, text(condominium.city.as_deref()));
    map.insert(CURRENT_DATE, format_date(today));

    map.insert(
        QUOTA_IMAGE,
        embed_attachment(form.attachment(fields::QUOTA_IMAGE)).to_string(),
    );
    map.insert(
        CALCULATION_IMAGE,
        embed_attachment(form.attachment(fields::CALCULATION_IMAGE)).to_string(),
    );

    map
}
