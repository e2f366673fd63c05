use std::io::Read;
use std::path::Path;

/// Two-column row of a headerless regression csv, column 0 = x, column 1 = y.
#[derive(Debug, serde::Deserialize)]
struct Row(f64, f64);

/// A pair of parallel columns loaded from one file.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn from_reader<R: Read>(reader: R) -> Result<Series, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut series = Series::default();

        for row in csv_reader.deserialize() {
            let Row(x, y) = row?;
            series.x.push(x);
            series.y.push(y);
        }

        Ok(series)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Series, csv::Error> {
        Series::from_reader(std::fs::File::open(path)?)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Holds at most one scatter dataset and at most one reference curve.
///
/// Both are optional and loaded independently; they only meet on the
/// plotting surface.
#[derive(Debug, Default)]
pub struct FitBases {
    pub data: Option<Series>,
    pub target: Option<Series>,
}

impl FitBases {
    pub fn load_data(&mut self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        self.data = Some(Series::from_path(path)?);
        Ok(())
    }

    pub fn load_target(&mut self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        self.target = Some(Series::from_path(path)?);
        Ok(())
    }
}
