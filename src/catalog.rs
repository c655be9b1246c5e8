use std::iter::Sum;
use std::ops::Add;
use std::path::Path;

use serde::Serialize;

use crate::weights::WeightVector;

const FIELDS_PER_ROW: usize = 6;

/// Amounts of the four logistics resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Resources {
    pub manpower: f64,
    pub ammo: f64,
    pub food: f64,
    pub parts: f64,
}

impl Resources {
    pub fn new(manpower: f64, ammo: f64, food: f64, parts: f64) -> Self {
        Self {
            manpower,
            ammo,
            food,
            parts,
        }
    }

    pub fn dot(&self, weights: &WeightVector) -> f64 {
        self.manpower * weights.manpower
            + self.ammo * weights.ammo
            + self.food * weights.food
            + self.parts * weights.parts
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Self) -> Self::Output {
        Resources {
            manpower: self.manpower + rhs.manpower,
            ammo: self.ammo + rhs.ammo,
            food: self.food + rhs.food,
            parts: self.parts + rhs.parts,
        }
    }
}

impl<'a> Sum<&'a Resources> for Resources {
    fn sum<I: Iterator<Item = &'a Resources>>(iter: I) -> Self {
        iter.fold(Resources::default(), |acc, r| acc + *r)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub level: i64,
    pub task_no: i64,
    pub cost: Resources,
}

impl Task {
    pub fn new(level: i64, task_no: i64, cost: Resources) -> Self {
        Self {
            level,
            task_no,
            cost,
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.level, self.task_no)
    }
}

/// The tasks in the order they were read. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalog(Vec<Task>);

impl Catalog {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }

    pub fn parse(s: &str) -> std::result::Result<Self, FormatError> {
        s.lines()
            .enumerate()
            .map(|(i, line)| parse_task_line(i + 1, line))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.0
    }
}

pub async fn load(path: &Path) -> Result<Catalog> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
    Catalog::parse(&contents).map_err(Into::into)
}

fn parse_task_line(line_no: usize, line: &str) -> std::result::Result<Task, FormatError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(FormatError::FieldCount {
            line_no,
            line: line.to_owned(),
            found: fields.len(),
        });
    }

    let mut values = [0.0; FIELDS_PER_ROW];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = parse_field(line_no, line, field)?;
    }
    let [level, task_no, manpower, ammo, food, parts] = values;

    Ok(Task::new(
        parse_identifier(line_no, line, fields[0], level)?,
        parse_identifier(line_no, line, fields[1], task_no)?,
        Resources::new(manpower, ammo, food, parts),
    ))
}

/// Truncates toward zero, not rounding. Values outside `i64` are an error
/// rather than a saturated identifier.
fn parse_identifier(
    line_no: usize,
    line: &str,
    field: &str,
    value: f64,
) -> std::result::Result<i64, FormatError> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= UPPER {
        return Err(FormatError::IdentifierOutOfRange {
            line_no,
            line: line.to_owned(),
            field: field.to_owned(),
        });
    }
    Ok(truncated as i64)
}

fn parse_field(line_no: usize, line: &str, field: &str) -> std::result::Result<f64, FormatError> {
    field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormatError::NotANumber {
            line_no,
            line: line.to_owned(),
            field: field.to_owned(),
        })
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog")]
    Format(#[from] FormatError),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("line {line_no} has {found} fields instead of 6: '{line}'")]
    FieldCount {
        line_no: usize,
        line: String,
        found: usize,
    },
    #[error("line {line_no} field '{field}' is not a finite number: '{line}'")]
    NotANumber {
        line_no: usize,
        line: String,
        field: String,
    },
    #[error("line {line_no} identifier '{field}' does not fit in a 64-bit integer: '{line}'")]
    IdentifierOutOfRange {
        line_no: usize,
        line: String,
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_file_order() {
        let catalog = Catalog::parse("1,1,10,0,0,0\n2,3, 0.5 ,1.25,0,7\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().to_string(), "1-1");

        let second = catalog.get(1).unwrap();
        assert_eq!((second.level, second.task_no), (2, 3));
        assert_eq!(second.cost, Resources::new(0.5, 1.25, 0.0, 7.0));
    }

    #[test]
    fn identifiers_are_truncated() {
        let catalog = Catalog::parse("2.9,4.99,1,1,1,1\n-1.5,0,0,0,0,0").unwrap();
        assert_eq!(catalog.get(0).unwrap().to_string(), "2-4");
        assert_eq!(catalog.get(1).unwrap().to_string(), "-1-0");
    }

    #[test]
    fn empty_input_is_an_empty_catalog() {
        assert!(Catalog::parse("").unwrap().is_empty());
        assert_eq!(Catalog::parse("1,1,1,1,1,1\n").unwrap().len(), 1);
    }

    #[test]
    fn blank_rows_abort_the_load() {
        let err = Catalog::parse("1,1,1,1,1,1\n\n1,2,2,2,2,2").unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCount {
                line_no: 2,
                line: String::new(),
                found: 1,
            }
        );
        assert!(matches!(
            Catalog::parse("1,1,1,1,1,1\n   \n1,2,2,2,2,2"),
            Err(FormatError::FieldCount { line_no: 2, .. })
        ));
        assert!(Catalog::parse("\n\n").is_err());
    }

    #[test]
    fn oversized_identifiers_are_rejected() {
        let err = Catalog::parse("1e19,1,0,0,0,0").unwrap_err();
        assert!(matches!(
            err,
            FormatError::IdentifierOutOfRange { line_no: 1, .. }
        ));
        assert!(Catalog::parse("1,-1e19,0,0,0,0").is_err());
        let catalog = Catalog::parse("9007199254740992,-9007199254740992,0,0,0,0").unwrap();
        assert_eq!(catalog.get(0).unwrap().level, 9_007_199_254_740_992);
        assert_eq!(catalog.get(0).unwrap().task_no, -9_007_199_254_740_992);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = Catalog::parse("1,1,1,1,1,1\n1,2,3,4,5\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCount {
                line_no: 2,
                line: "1,2,3,4,5".to_owned(),
                found: 5,
            }
        );
        assert!(Catalog::parse("1,1,1,1,1,1,1").is_err());
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = Catalog::parse("level,task,a,b,c,d").unwrap_err();
        assert!(matches!(err, FormatError::NotANumber { line_no: 1, .. }));
        assert!(Catalog::parse("1,1,nan,0,0,0").is_err());
        assert!(Catalog::parse("1,1,inf,0,0,0").is_err());
        assert!(Catalog::parse("1,1,,0,0,0").is_err());
    }

    #[test]
    fn task_displays_as_level_dash_number() {
        let task = Task::new(3, 12, Resources::default());
        assert_eq!(task.to_string(), "3-12");
    }

    #[test]
    fn resources_sum_and_dot() {
        let total: Resources = [
            Resources::new(1.0, 2.0, 3.0, 4.0),
            Resources::new(10.0, 20.0, 30.0, 40.0),
        ]
        .iter()
        .sum();
        assert_eq!(total, Resources::new(11.0, 22.0, 33.0, 44.0));

        let weights = WeightVector::new(1.0, 0.0, -1.0, 0.5);
        assert_eq!(total.dot(&weights), 11.0 - 33.0 + 22.0);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let err = load(Path::new("does/not/exist.csv")).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
