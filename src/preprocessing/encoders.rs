use crate::error::{ArtifactError, EncodingError};
use crate::preprocessing::features::{EncodedFeatureVector, RawInputRecord};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The four fields the model expects as integer category indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    BodyType,
    Transmission,
    FuelType,
    Location,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::BodyType,
        CategoricalField::Transmission,
        CategoricalField::FuelType,
        CategoricalField::Location,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::BodyType => "Body_type",
            CategoricalField::Transmission => "Transmission",
            CategoricalField::FuelType => "Fuel_type",
            CategoricalField::Location => "Location",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label -> index mapping learned for one field. The index of a label is
/// its position in the fitted class list.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    classes: Vec<String>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    pub fn from_classes(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("vocabulary has no classes".to_string());
        }
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            let id = u32::try_from(i).map_err(|_| "vocabulary is too large".to_string())?;
            if index.insert(class.clone(), id).is_some() {
                return Err(format!("duplicate class '{}'", class));
            }
        }
        Ok(Self { classes, index })
    }

    pub fn lookup(&self, label: &str) -> Option<u32> {
        self.index.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Fitted vocabularies for every categorical field.
#[derive(Debug, Clone)]
pub struct CategoricalEncoderSet {
    vocabularies: HashMap<CategoricalField, Vocabulary>,
}

impl CategoricalEncoderSet {
    /// Builds the set from `field name -> classes`. Every categorical field
    /// must be present; unrelated keys are ignored.
    pub fn from_classes(mut raw: HashMap<String, Vec<String>>) -> Result<Self, ArtifactError> {
        let mut vocabularies = HashMap::with_capacity(CategoricalField::ALL.len());
        for field in CategoricalField::ALL {
            let classes = raw.remove(field.name()).ok_or_else(|| {
                ArtifactError::Invalid(format!("no encoder for field {}", field))
            })?;
            let vocabulary = Vocabulary::from_classes(classes)
                .map_err(|e| ArtifactError::Invalid(format!("encoder for {}: {}", field, e)))?;
            vocabularies.insert(field, vocabulary);
        }
        for extra in raw.keys() {
            tracing::debug!(field = %extra, "ignoring encoder for unused field");
        }
        Ok(Self { vocabularies })
    }

    pub fn from_json(content: &str, origin: &str) -> Result<Self, ArtifactError> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(content).map_err(|source| ArtifactError::Parse {
                path: origin.to_string(),
                source,
            })?;
        Self::from_classes(raw)
    }

    /// Reads the encoder file written at training time.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ArtifactError::NotFound(display));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: display.clone(),
            source,
        })?;
        let encoders = Self::from_json(&content, &display)?;
        tracing::info!(path = %path.display(), "loaded categorical encoders");
        Ok(encoders)
    }

    pub fn vocabulary(&self, field: CategoricalField) -> &Vocabulary {
        // Construction guarantees an entry for every field.
        &self.vocabularies[&field]
    }

    pub fn transform(&self, field: CategoricalField, value: &str) -> Result<u32, EncodingError> {
        self.vocabulary(field)
            .lookup(value)
            .ok_or_else(|| EncodingError::UnknownCategory(field.name().to_string(), value.to_string()))
    }

    /// Maps a raw record onto the model's feature space. Numeric fields are
    /// passed through untouched.
    pub fn encode(&self, record: &RawInputRecord) -> Result<EncodedFeatureVector, EncodingError> {
        Ok(EncodedFeatureVector {
            mileage: record.mileage,
            engine_displacement: record.engine_displacement,
            year_of_manufacture: record.year_of_manufacture,
            transmission: self.transform(CategoricalField::Transmission, &record.transmission)?,
            fuel_type: self.transform(CategoricalField::FuelType, &record.fuel_type)?,
            owner_no: record.owner_no,
            model_year: record.model_year,
            location: self.transform(CategoricalField::Location, &record.location)?,
            kilometer_driven: record.kilometer_driven,
            body_type: self.transform(CategoricalField::BodyType, &record.body_type)?,
        })
    }
}
