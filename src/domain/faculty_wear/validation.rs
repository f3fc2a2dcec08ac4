use super::wear::{
    DEFAULT_ADD_TO_CART_TEXT, DEFAULT_BUY_NOW_TEXT, WearDraft, WearForm, extension_of,
};

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub fn allowed_image(filename: &str) -> bool {
    extension_of(filename)
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Checks a submitted form and converts it into a [`WearDraft`].
///
/// Every problem is reported, not just the first, so the client can show all
/// of them next to the form.
pub fn validate(form: &WearForm) -> Result<WearDraft, Vec<String>> {
    let mut errors = Vec::new();

    let title = present(&form.title);
    if title.is_none() {
        errors.push("Title is required".to_string());
    }

    let description = present(&form.description);
    if description.is_none() {
        errors.push("Description is required".to_string());
    }

    let standard_price = match present(&form.standard_price) {
        None => {
            errors.push("Standard price is required".to_string());
            None
        }
        Some(raw) => match parse_price(raw) {
            None => {
                errors.push("Standard price must be a number".to_string());
                None
            }
            Some(v) if v <= 0.0 => {
                errors.push("Standard price must be greater than 0".to_string());
                None
            }
            Some(v) => Some(v),
        },
    };

    let custom_price = match present(&form.custom_price) {
        None => None,
        Some(raw) => match parse_price(raw) {
            None => {
                errors.push("Custom price must be a number".to_string());
                None
            }
            Some(v) if v <= 0.0 => {
                errors.push("Custom price must be greater than 0".to_string());
                None
            }
            Some(v) => Some(v),
        },
    };

    let display_order = match present(&form.order) {
        None => {
            errors.push("Display order is required".to_string());
            None
        }
        Some(raw) => match raw.parse::<i32>() {
            Err(_) => {
                errors.push("Display order must be a whole number".to_string());
                None
            }
            Ok(v) if v < 1 => {
                errors.push("Display order must be at least 1".to_string());
                None
            }
            Ok(v) => Some(v),
        },
    };

    match (title, description, standard_price, display_order) {
        (Some(title), Some(description), Some(standard_price), Some(display_order))
            if errors.is_empty() =>
        {
            Ok(WearDraft {
                title: title.to_string(),
                description: description.to_string(),
                badge_text: form.badge_text.clone().unwrap_or_default(),
                standard_price,
                custom_price,
                add_to_cart_text: form
                    .add_to_cart_text
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ADD_TO_CART_TEXT.to_string()),
                add_to_cart_link: form.add_to_cart_link.clone().unwrap_or_default(),
                buy_now_text: form
                    .buy_now_text
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BUY_NOW_TEXT.to_string()),
                buy_now_link: form.buy_now_link.clone().unwrap_or_default(),
                display_order,
            })
        }
        _ => Err(errors),
    }
}
