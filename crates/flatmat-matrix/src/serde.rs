use crate::FlatMatrix;

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for FlatMatrix<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("FlatMatrix", 2)?;
        state.serialize_field("dim", &self.dim)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for FlatMatrix<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            dim: Vec<usize>,
            data: Vec<T>,
        }

        let Raw { dim, data } = Raw::deserialize(deserializer)?;

        // Persisted shapes are already resolved: no placeholder inference,
        // the product must cover the data exactly.
        let numel: usize = dim.iter().product();
        if dim.is_empty() || numel != data.len() {
            return Err(serde::de::Error::custom(format!(
                "shape {:?} does not match {} data elements",
                dim,
                data.len()
            )));
        }

        Ok(FlatMatrix { dim, data })
    }
}
