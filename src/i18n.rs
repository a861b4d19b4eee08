//! User-facing strings in every supported locale.

use crate::entities::Locale;

const EN: &[(&str, &str)] = &[
    ("bidSubmitted", "Your bid has been submitted."),
    ("bidsNowVisible", "The selected bids are now visible to the customer."),
    ("enterEmail", "Please enter your email address."),
    ("english", "English"),
    ("fillCardDetails", "Please fill in all card details."),
    ("invalidEmail", "Please enter a valid email address."),
    ("language", "Language"),
    ("noBidsVisible", "No bids are visible to the customer."),
    ("requestNotFound", "Request not found."),
    ("requestSubmittedSuccess", "Your request has been submitted."),
    ("spanish", "Spanish"),
    ("subscribeToPlaceMore", "You have used your free bids. Subscribe to place more bids."),
    ("subscriptionSuccess", "Your subscription is active."),
    ("winningSaved", "Winning bid saved."),
    ("youWon", "You won this deal."),
];

const ES: &[(&str, &str)] = &[
    ("bidSubmitted", "Tu oferta ha sido enviada."),
    ("bidsNowVisible", "Las ofertas seleccionadas ya son visibles para el cliente."),
    ("enterEmail", "Introduce tu correo electrónico."),
    ("english", "Inglés"),
    ("fillCardDetails", "Completa todos los datos de la tarjeta."),
    ("invalidEmail", "Introduce un correo electrónico válido."),
    ("language", "Idioma"),
    ("noBidsVisible", "Ninguna oferta es visible para el cliente."),
    ("requestNotFound", "Solicitud no encontrada."),
    ("requestSubmittedSuccess", "Tu solicitud ha sido enviada."),
    ("spanish", "Español"),
    ("subscribeToPlaceMore", "Has usado tus ofertas gratuitas. Suscríbete para enviar más."),
    ("subscriptionSuccess", "Tu suscripción está activa."),
    ("winningSaved", "Oferta ganadora guardada."),
    ("youWon", "Ganaste este trabajo."),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Es => ES,
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, text)| *text)
}

/// Missing translations fall back to English, then to the key itself.
pub fn t(locale: Locale, key: &str) -> String {
    lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .unwrap_or(key)
        .to_string()
}

#[test]
fn translates_with_fallback() {
    assert_eq!(t(Locale::Es, "language"), "Idioma");
    assert_eq!(t(Locale::En, "language"), "Language");
    assert_eq!(t(Locale::Es, "noSuchKey"), "noSuchKey");
}

#[test]
fn every_locale_covers_english_keys() {
    for (key, _) in EN {
        assert!(lookup(Locale::Es, key).is_some(), "missing es for {}", key);
    }
}
