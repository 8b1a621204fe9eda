use crate::utils::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Field {
    Name,
    Photo,
    AdmArea,
    District,
    Location,
    RegistrationNumber,
    State,
    LocationType,
    #[strum(serialize = "global_id")]
    GlobalId,
    #[strum(serialize = "geodata_center")]
    GeoDataCenter,
    #[strum(serialize = "geoarea")]
    GeoArea,
}

impl Field {
    pub const COUNT: usize = 11;

    pub const ALL: [Field; Field::COUNT] = [
        Field::Name,
        Field::Photo,
        Field::AdmArea,
        Field::District,
        Field::Location,
        Field::RegistrationNumber,
        Field::State,
        Field::LocationType,
        Field::GlobalId,
        Field::GeoDataCenter,
        Field::GeoArea,
    ];

    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn parse(name: &str) -> Result<Self> {
        Field::from_str(name).map_err(|_| BotError::UnknownField(name.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attraction {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Photo")]
    pub photo: String,
    #[serde(rename = "AdmArea")]
    pub adm_area: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "RegistrationNumber")]
    pub registration_number: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "LocationType")]
    pub location_type: String,
    #[serde(rename = "global_id")]
    pub global_id: String,
    #[serde(rename = "geodata_center")]
    pub geodata_center: String,
    #[serde(rename = "geoarea")]
    pub geoarea: String,
}

impl Attraction {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Photo => &self.photo,
            Field::AdmArea => &self.adm_area,
            Field::District => &self.district,
            Field::Location => &self.location,
            Field::RegistrationNumber => &self.registration_number,
            Field::State => &self.state,
            Field::LocationType => &self.location_type,
            Field::GlobalId => &self.global_id,
            Field::GeoDataCenter => &self.geodata_center,
            Field::GeoArea => &self.geoarea,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Photo => &mut self.photo,
            Field::AdmArea => &mut self.adm_area,
            Field::District => &mut self.district,
            Field::Location => &mut self.location,
            Field::RegistrationNumber => &mut self.registration_number,
            Field::State => &mut self.state,
            Field::LocationType => &mut self.location_type,
            Field::GlobalId => &mut self.global_id,
            Field::GeoDataCenter => &mut self.geodata_center,
            Field::GeoArea => &mut self.geoarea,
        }
    }

    pub fn value_by_name(&self, name: &str) -> Result<&str> {
        Ok(self.field(Field::parse(name)?))
    }

    /// Builds a record from positional values; missing trailing values stay
    /// empty and extra values are ignored.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attraction = Attraction::default();
        for (field, value) in Field::ALL.iter().zip(values) {
            *attraction.field_mut(*field) = value.into();
        }
        attraction
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        Field::ALL.iter().map(move |f| self.field(*f))
    }
}

pub fn compare(a: &Attraction, b: &Attraction, descending: bool) -> Ordering {
    let ordering = a.name.as_bytes().cmp(b.name.as_bytes());
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}
