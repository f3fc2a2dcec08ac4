use uuid::Uuid;

pub const DEFAULT_ADD_TO_CART_TEXT: &str = "Add to Cart";
pub const DEFAULT_BUY_NOW_TEXT: &str = "Buy Now";

#[derive(Debug, Clone, PartialEq)]
pub struct FacultyWear {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub badge_text: String,
    pub standard_price: f64,
    pub custom_price: Option<f64>,
    pub add_to_cart_text: String,
    pub add_to_cart_link: String,
    pub buy_now_text: String,
    pub buy_now_link: String,
    pub display_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Raw text fields of a submitted catalogue form.
///
/// `None` means the field was not sent at all, which is different from an
/// empty value for the optional texts: only absent texts get their defaults.
#[derive(Debug, Clone, Default)]
pub struct WearForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub badge_text: Option<String>,
    pub standard_price: Option<String>,
    pub custom_price: Option<String>,
    pub add_to_cart_text: Option<String>,
    pub add_to_cart_link: Option<String>,
    pub buy_now_text: Option<String>,
    pub buy_now_link: Option<String>,
    pub order: Option<String>,
}

impl WearForm {
    /// Assigns a multipart/form field by name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "badge_text" => &mut self.badge_text,
            "standard_price" => &mut self.standard_price,
            "custom_price" => &mut self.custom_price,
            "add_to_cart_text" => &mut self.add_to_cart_text,
            "add_to_cart_link" => &mut self.add_to_cart_link,
            "buy_now_text" => &mut self.buy_now_text,
            "buy_now_link" => &mut self.buy_now_link,
            "order" => &mut self.order,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// A validated form, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct WearDraft {
    pub title: String,
    pub description: String,
    pub badge_text: String,
    pub standard_price: f64,
    pub custom_price: Option<f64>,
    pub add_to_cart_text: String,
    pub add_to_cart_link: String,
    pub buy_now_text: String,
    pub buy_now_link: String,
    pub display_order: i32,
}

/// An image file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lower-cased last extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }
}

pub(crate) fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
