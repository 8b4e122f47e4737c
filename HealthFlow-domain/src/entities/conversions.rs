use crate::entities::blood_pressure::BloodPressureReading;
use crate::entities::profile::Profile;
use health_flow_data::models::{
    BloodPressureReading as DataBloodPressureReading, StoredProfile,
};

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for blood pressure reading
pub fn convert_to_domain_reading(data_reading: DataBloodPressureReading) -> BloodPressureReading {
    BloodPressureReading {
        systolic: data_reading.systolic,
        diastolic: data_reading.diastolic,
        pulse: data_reading.pulse,
        date: data_reading.date,
        time: data_reading.time,
    }
}

/// Convert from domain entity to data model for blood pressure reading
pub fn convert_to_data_reading(domain_reading: &BloodPressureReading) -> DataBloodPressureReading {
    DataBloodPressureReading {
        systolic: domain_reading.systolic,
        diastolic: domain_reading.diastolic,
        pulse: domain_reading.pulse,
        date: domain_reading.date,
        time: domain_reading.time,
    }
}

/// Convert from data model to domain entity for profile.
///
/// BMI is recomputed here rather than read from storage.
pub fn convert_to_domain_profile(data_profile: StoredProfile) -> Profile {
    Profile::new(
        data_profile.name,
        data_profile.age,
        data_profile.gender,
        data_profile.height_cm,
        data_profile.weight_kg,
    )
}

/// Convert from domain entity to data model for profile
pub fn convert_to_data_profile(domain_profile: &Profile) -> StoredProfile {
    StoredProfile {
        name: domain_profile.name.clone(),
        age: domain_profile.age,
        gender: domain_profile.gender.clone(),
        height_cm: domain_profile.height_cm(),
        weight_kg: domain_profile.weight_kg(),
    }
}
