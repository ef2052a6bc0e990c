use crate::models::Product;
use thiserror::Error;

/// Why a form was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    NonNumericPrice { field: &'static str, value: String },

    #[error("{field} cannot be negative")]
    NegativePrice { field: &'static str },

    #[error("quantity must be a whole number, got '{0}'")]
    InvalidQuantity(String),

    #[error("quantity cannot be negative (got {0})")]
    NegativeQuantity(i64),

    #[error("new password and confirmation do not match")]
    PasswordMismatch,
}

/// Raw product form input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub size: String,
    pub gender: String,
    pub kind: String,
    pub purchase_price: String,
    pub sale_price: String,
    pub quantity: String,
}

/// A product form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub size: String,
    pub gender: String,
    pub kind: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub quantity: u32,
}

impl ProductForm {
    /// Prefill for editing an existing product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            size: product.size.clone(),
            gender: product.gender.clone(),
            kind: product.kind.clone(),
            purchase_price: product.purchase_price.to_string(),
            sale_price: product.sale_price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    /// Check required fields, then parse the numeric ones.
    ///
    /// An empty quantity means one unit, same as the blank form.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = required("name", &self.name)?;
        let brand = required("brand", &self.brand)?;
        let purchase_raw = required("purchase price", &self.purchase_price)?;
        let sale_raw = required("sale price", &self.sale_price)?;

        let purchase_price = parse_price("purchase price", purchase_raw)?;
        let sale_price = parse_price("sale price", sale_raw)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(NewProduct {
            name: name.to_string(),
            brand: brand.to_string(),
            size: self.size.trim().to_string(),
            gender: self.gender.trim().to_string(),
            kind: self.kind.trim().to_string(),
            purchase_price,
            sale_price,
            quantity,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::NonNumericPrice {
            field,
            value: raw.to_string(),
        })?;

    if value < 0.0 {
        return Err(ValidationError::NegativePrice { field });
    }
    Ok(value)
}

fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1);
    }

    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity(raw.to_string()))?;

    if value < 0 {
        return Err(ValidationError::NegativeQuantity(value));
    }
    u32::try_from(value).map_err(|_| ValidationError::InvalidQuantity(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "Camiseta Vintage Nike".to_string(),
            brand: "Nike".to_string(),
            size: "M".to_string(),
            gender: "Unisex".to_string(),
            kind: "Camiseta".to_string(),
            purchase_price: "12".to_string(),
            sale_price: "25.5".to_string(),
            quantity: "3".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let product = form().validate().unwrap();
        assert_eq!(product.name, "Camiseta Vintage Nike");
        assert_eq!(product.purchase_price, 12.0);
        assert_eq!(product.sale_price, 25.5);
        assert_eq!(product.quantity, 3);
    }

    #[test]
    fn test_missing_required_fields_in_order() {
        let mut f = form();
        f.name = "  ".to_string();
        f.brand.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("name")));

        let mut f = form();
        f.sale_price.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("sale price")));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let mut f = form();
        f.size.clear();
        f.gender.clear();
        f.kind.clear();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_non_numeric_price() {
        let mut f = form();
        f.purchase_price = "twelve".to_string();
        assert_eq!(
            f.validate(),
            Err(ValidationError::NonNumericPrice {
                field: "purchase price",
                value: "twelve".to_string()
            })
        );

        f.purchase_price = "NaN".to_string();
        assert!(matches!(
            f.validate(),
            Err(ValidationError::NonNumericPrice { .. })
        ));
    }

    #[test]
    fn test_negative_price() {
        let mut f = form();
        f.sale_price = "-3".to_string();
        assert_eq!(
            f.validate(),
            Err(ValidationError::NegativePrice { field: "sale price" })
        );
    }

    #[test]
    fn test_quantity_rules() {
        let mut f = form();
        f.quantity = "-1".to_string();
        assert_eq!(f.validate(), Err(ValidationError::NegativeQuantity(-1)));

        f.quantity = "1.5".to_string();
        assert_eq!(
            f.validate(),
            Err(ValidationError::InvalidQuantity("1.5".to_string()))
        );

        f.quantity = String::new();
        assert_eq!(f.validate().unwrap().quantity, 1);

        f.quantity = "0".to_string();
        assert_eq!(f.validate().unwrap().quantity, 0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingField("brand").to_string(),
            "brand is required"
        );
        assert_eq!(
            ValidationError::NegativeQuantity(-2).to_string(),
            "quantity cannot be negative (got -2)"
        );
    }
}
