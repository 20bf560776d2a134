// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Commitment, ReminderThreshold};

/// Replaces every case-insensitive occurrence of `{name}` in `input`
/// with `value`. Placeholder names are ASCII; the surrounding text may
/// be arbitrary UTF-8.
fn replace_placeholder(input: &str, name: &str, value: &str) -> String {
    let token: String = format!("{{{name}}}");
    let mut out: String = String::with_capacity(input.len());
    let mut rest: &str = input;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail: &str = &rest[pos..];
        if tail
            .get(..token.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(&token))
        {
            out.push_str(value);
            rest = &tail[token.len()..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Formats the commitment's date as `dd/mm/yyyy`.
fn format_date(commitment: &Commitment) -> String {
    commitment.commitment_date.format("%d/%m/%Y").to_string()
}

/// Formats the commitment's time as `HH:MM`.
fn format_time(commitment: &Commitment) -> String {
    commitment.commitment_time.format("%H:%M").to_string()
}

/// Builds the outgoing message body for one recipient.
///
/// A `threshold` of `None` means the on-time reminder. A non-empty
/// custom template on the commitment wins for "before" reminders and is
/// returned verbatim after placeholder substitution, with no default
/// header. On-time reminders always use the default layout, which also
/// omits the description line.
///
/// Rendering is pure; it is called once per recipient because the
/// recipient name is interpolated into the greeting.
#[must_use]
pub fn render_message(
    recipient_name: &str,
    commitment: &Commitment,
    threshold: Option<&ReminderThreshold>,
) -> String {
    let date_formatted: String = format_date(commitment);
    let time_formatted: String = format_time(commitment);
    let category_label: &str = commitment.category.label();

    if let Some(threshold) = threshold {
        if let Some(template) = commitment
            .custom_message
            .as_deref()
            .filter(|template| !template.trim().is_empty())
        {
            let mut message: String = replace_placeholder(template, "nome", recipient_name);
            message = replace_placeholder(&message, "titulo", &commitment.title);
            message = replace_placeholder(&message, "data", &date_formatted);
            message = replace_placeholder(&message, "horario", &time_formatted);
            message =
                replace_placeholder(&message, "local", commitment.location.as_deref().unwrap_or(""));
            message = replace_placeholder(
                &message,
                "profissional",
                commitment.provider_name.as_deref().unwrap_or(""),
            );
            message = replace_placeholder(&message, "categoria", category_label);
            message = replace_placeholder(&message, "tempo", &threshold.unit_label);
            return message;
        }
    }

    let headline: String = match threshold {
        Some(threshold) => format!(
            "Olá {recipient_name}! Você tem um compromisso em *{}*:",
            threshold.unit_label
        ),
        None => format!("Olá {recipient_name}! Seu compromisso é *agora*:"),
    };

    let mut message: String = format!(
        "⏰ *Lembrete WhatsPing*\n\n{headline}\n\n{category_label}\n📋 *{}*\n📅 {date_formatted} às {time_formatted}\n",
        commitment.title
    );

    if let Some(provider) = commitment.provider_name.as_deref().filter(|v| !v.is_empty()) {
        message.push_str(&format!("👤 {provider}\n"));
    }
    if let Some(location) = commitment.location.as_deref().filter(|v| !v.is_empty()) {
        message.push_str(&format!("📍 {location}\n"));
    }
    if threshold.is_some() {
        if let Some(description) = commitment.description.as_deref().filter(|v| !v.is_empty()) {
            message.push_str(&format!("📝 {description}\n"));
        }
    }

    message.push_str("\n_Enviado automaticamente pelo WhatsPing_");
    message
}
