use crate::error::FrameError;
use crate::series::Series;

/// An ordered set of equal-length named columns.
///
/// Used for multi-column indicator output, most prominently the signal
/// tables. Column order is preserved; inserting a column under an
/// existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<Series>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from columns, enforcing equal lengths.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] when a column's length
    /// differs from the first column's.
    pub fn from_columns(columns: Vec<Series>) -> Result<Self, FrameError> {
        let mut frame = Self::new();
        for column in columns {
            frame.insert(column)?;
        }
        Ok(frame)
    }

    /// Inserts a column, replacing any column with the same name.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] when the column's length
    /// differs from the frame's row count.
    pub fn insert(&mut self, column: Series) -> Result<(), FrameError> {
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                column: column.name,
                expected: self.len(),
                actual: column.values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns in insertion order
    #[must_use]
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Consumes the frame, yielding its columns in order.
    #[must_use]
    pub fn into_columns(self) -> Vec<Series> {
        self.columns
    }

    /// Column names in insertion order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (0 for a frame without columns)
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    /// Whether the frame holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl serde::Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.columns.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Frame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let columns = Vec::<Series>::deserialize(deserializer)?;
        Frame::from_columns(columns).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: Vec<f64>) -> Series {
        Series::from_values(name, values)
    }

    #[test]
    fn test_frame_from_columns() {
        let frame = Frame::from_columns(vec![
            column("a", vec![1.0, 2.0]),
            column("b", vec![3.0, 4.0]),
        ])
        .unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_frame_length_mismatch() {
        let result = Frame::from_columns(vec![
            column("a", vec![1.0, 2.0]),
            column("b", vec![3.0]),
        ]);
        assert!(matches!(
            result,
            Err(FrameError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_frame_insert_replaces_same_name() {
        let mut frame = Frame::new();
        frame.insert(column("a", vec![1.0, 2.0])).unwrap();
        frame.insert(column("b", vec![3.0, 4.0])).unwrap();
        frame.insert(column("a", vec![5.0, 6.0])).unwrap();

        assert_eq!(frame.width(), 2);
        assert_eq!(frame.names(), vec!["a", "b"]);
        assert_eq!(frame.column("a").unwrap().get(0), Some(5.0));
    }

    #[test]
    fn test_frame_column_lookup() {
        let frame = Frame::from_columns(vec![column("a", vec![1.0])]).unwrap();
        assert!(frame.column("a").is_some());
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_frame_serde_roundtrip() {
        let frame = Frame::from_columns(vec![
            column("a", vec![1.0, 2.0]),
            column("b", vec![3.0, 4.0]),
        ])
        .unwrap();
        let json = serde_json::to_string(&frame).unwrap();
        let deserialized: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, deserialized);
    }

    #[test]
    fn test_frame_deserialize_rejects_misaligned_columns() {
        let json = r#"[
            {"name": "a", "category": null, "values": [1.0, 2.0]},
            {"name": "b", "category": null, "values": [3.0]}
        ]"#;
        let result: Result<Frame, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
