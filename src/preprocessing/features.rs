use ndarray::{arr2, Array2};
use serde::{Deserialize, Serialize};

/// Choices offered by the form. The fitted vocabularies are the authority;
/// these only drive the select widgets.
pub const TRANSMISSIONS: [&str; 2] = ["Manual", "Automatic"];
pub const FUEL_TYPES: [&str; 2] = ["Petrol", "Diesel"];
pub const LOCATIONS: [&str; 6] = [
    "Chennai",
    "Bangalore",
    "Delhi",
    "Kolkata",
    "Jaipur",
    "Hyderabad",
];
pub const BODY_TYPES: [&str; 10] = [
    "Hatchback",
    "SUV",
    "Sedan",
    "MUV",
    "Minivans",
    "Coupe",
    "Pickup Trucks",
    "Convertibles",
    "Hybrids",
    "Wagon",
];

/// One form submission, as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputRecord {
    pub mileage: f64,
    pub engine_displacement: u32,
    pub year_of_manufacture: u16,
    pub transmission: String,
    pub fuel_type: String,
    pub owner_no: u32,
    pub model_year: u16,
    pub location: String,
    pub kilometer_driven: u32,
    pub body_type: String,
}

/// Hashable identity of a [`RawInputRecord`]; mileage is compared bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    mileage_bits: u64,
    engine_displacement: u32,
    year_of_manufacture: u16,
    transmission: String,
    fuel_type: String,
    owner_no: u32,
    model_year: u16,
    location: String,
    kilometer_driven: u32,
    body_type: String,
}

impl RawInputRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            mileage_bits: self.mileage.to_bits(),
            engine_displacement: self.engine_displacement,
            year_of_manufacture: self.year_of_manufacture,
            transmission: self.transmission.clone(),
            fuel_type: self.fuel_type.clone(),
            owner_no: self.owner_no,
            model_year: self.model_year,
            location: self.location.clone(),
            kilometer_driven: self.kilometer_driven,
            body_type: self.body_type.clone(),
        }
    }
}

/// Model input columns, in the order the regressor was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Mileage,
    EngineDisplacement,
    YearOfManufacture,
    Transmission,
    FuelType,
    OwnerNo,
    ModelYear,
    Location,
    KilometerDriven,
    BodyType,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; 10] = [
        FeatureColumn::Mileage,
        FeatureColumn::EngineDisplacement,
        FeatureColumn::YearOfManufacture,
        FeatureColumn::Transmission,
        FeatureColumn::FuelType,
        FeatureColumn::OwnerNo,
        FeatureColumn::ModelYear,
        FeatureColumn::Location,
        FeatureColumn::KilometerDriven,
        FeatureColumn::BodyType,
    ];

    /// Column name used in the training data.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Mileage => "Mileage",
            FeatureColumn::EngineDisplacement => "Engine_displacement",
            FeatureColumn::YearOfManufacture => "Year_of_manufacture",
            FeatureColumn::Transmission => "Transmission",
            FeatureColumn::FuelType => "Fuel_type",
            FeatureColumn::OwnerNo => "Owner_No.",
            FeatureColumn::ModelYear => "Model_year",
            FeatureColumn::Location => "Location",
            FeatureColumn::KilometerDriven => "Kilometer_Driven",
            FeatureColumn::BodyType => "Body_type",
        }
    }
}

/// A record with every categorical field replaced by its fitted index.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector {
    pub mileage: f64,
    pub engine_displacement: u32,
    pub year_of_manufacture: u16,
    pub transmission: u32,
    pub fuel_type: u32,
    pub owner_no: u32,
    pub model_year: u16,
    pub location: u32,
    pub kilometer_driven: u32,
    pub body_type: u32,
}

impl EncodedFeatureVector {
    pub const WIDTH: usize = FeatureColumn::ALL.len();

    pub fn get(&self, column: FeatureColumn) -> f64 {
        match column {
            FeatureColumn::Mileage => self.mileage,
            FeatureColumn::EngineDisplacement => f64::from(self.engine_displacement),
            FeatureColumn::YearOfManufacture => f64::from(self.year_of_manufacture),
            FeatureColumn::Transmission => f64::from(self.transmission),
            FeatureColumn::FuelType => f64::from(self.fuel_type),
            FeatureColumn::OwnerNo => f64::from(self.owner_no),
            FeatureColumn::ModelYear => f64::from(self.model_year),
            FeatureColumn::Location => f64::from(self.location),
            FeatureColumn::KilometerDriven => f64::from(self.kilometer_driven),
            FeatureColumn::BodyType => f64::from(self.body_type),
        }
    }

    /// Values in training column order.
    pub fn values(&self) -> [f64; Self::WIDTH] {
        FeatureColumn::ALL.map(|column| self.get(column))
    }

    /// Single-row `1 x 10` matrix fed to the regressor.
    pub fn to_array(&self) -> Array2<f32> {
        let row = self.values().map(|v| v as f32);
        arr2(&[row])
    }
}
