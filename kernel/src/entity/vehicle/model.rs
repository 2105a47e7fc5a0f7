use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VehicleModel(String);

impl VehicleModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self(model.into())
    }
}
