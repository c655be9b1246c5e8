/// Per-resource coefficients. Any sign is allowed; a negative weight turns
/// that resource into a cost.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightVector {
    pub manpower: f64,
    pub ammo: f64,
    pub food: f64,
    pub parts: f64,
}

impl WeightVector {
    pub fn new(manpower: f64, ammo: f64, food: f64, parts: f64) -> Self {
        Self {
            manpower,
            ammo,
            food,
            parts,
        }
    }

    /// Converts the four free-form text fields as typed by the user.
    pub fn parse_fields(manpower: &str, ammo: &str, food: &str, parts: &str) -> Result<Self> {
        Ok(Self {
            manpower: parse_weight("manpower", manpower)?,
            ammo: parse_weight("ammo", ammo)?,
            food: parse_weight("food", food)?,
            parts: parse_weight("parts", parts)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("manpower", self.manpower),
            ("ammo", self.ammo),
            ("food", self.food),
            ("parts", self.parts),
        ]
        .into_iter()
    }
}

fn parse_weight(field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value = trimmed.parse::<f64>().map_err(|_| Error::NotANumber {
        field,
        text: text.to_owned(),
    })?;
    if !value.is_finite() {
        return Err(Error::NotFinite {
            field,
            text: text.to_owned(),
        });
    }
    Ok(value)
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("please enter a valid number for the {field} weight (got '{text}')")]
    NotANumber { field: &'static str, text: String },
    #[error("the {field} weight must be a finite number (got '{text}')")]
    NotFinite { field: &'static str, text: String },
}
