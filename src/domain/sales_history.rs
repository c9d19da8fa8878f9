use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One day of observed sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    pub date: NaiveDate,
    pub sales: f64,
}

/// Chronologically ordered daily sales, used to fit a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesHistory {
    pub observations: Vec<SalesObservation>,
}

impl SalesHistory {
    pub fn new(mut observations: Vec<SalesObservation>) -> Result<Self> {
        if observations.is_empty() {
            bail!("Sales history is empty");
        }
        if let Some(bad) = observations.iter().find(|o| !o.sales.is_finite()) {
            bail!("Non-finite sales value on {}", bad.date);
        }
        observations.sort_by_key(|o| o.date);
        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            bail!("Duplicate sales entry for {}", pair[0].date);
        }
        Ok(Self { observations })
    }

    /// Loads `.json` (array of {date, sales}) or CSV (`date,sales`, header optional).
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let file = File::open(path).context(format!("Failed to open sales history: {:?}", path))?;
        let reader = BufReader::new(file);
        if is_json {
            let observations: Vec<SalesObservation> = serde_json::from_reader(reader)
                .context(format!("Failed to parse JSON history: {:?}", path))?;
            Self::new(observations)
        } else {
            Self::from_csv_reader(reader)
                .context(format!("Failed to parse CSV history: {:?}", path))
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let observations: Vec<SalesObservation> = serde_json::from_str(text)?;
        Self::new(observations)
    }

    pub fn from_csv(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// A header row is recognised by its first field not being a date. With a header the
    /// `date` and `sales` columns are found by name (case-insensitive) and any other columns
    /// are ignored. Without one, rows must be exactly `date,sales`.
    pub fn from_csv_reader<R: Read>(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(source);
        let mut records = reader.records();

        let Some(first) = records.next().transpose()? else {
            bail!("Sales history is empty");
        };
        let mut observations = Vec::new();
        let columns = if first.get(0).is_some_and(|f| parse_date(f).is_ok()) {
            let columns = CsvColumns { date: 0, sales: 1 };
            if first.len() != 2 {
                bail!(
                    "Line 1: expected `date,sales` without a header, got {} fields",
                    first.len()
                );
            }
            observations.push(columns.parse(&first)?);
            columns
        } else {
            CsvColumns::from_header(&first)?
        };

        for record in records {
            observations.push(columns.parse(&record?)?);
        }
        Self::new(observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.sales).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

fn parse_date(field: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
}

/// Column positions of the date and sales fields in a CSV record.
struct CsvColumns {
    date: usize,
    sales: usize,
}

impl CsvColumns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        match (find("date"), find("sales")) {
            (Some(date), Some(sales)) => Ok(Self { date, sales }),
            _ => bail!(
                "CSV header must name `date` and `sales` columns, got {:?}",
                header.iter().collect::<Vec<_>>()
            ),
        }
    }

    fn parse(&self, record: &StringRecord) -> Result<SalesObservation> {
        let line = record.position().map_or(0, |p| p.line());
        let (Some(date), Some(sales)) = (record.get(self.date), record.get(self.sales)) else {
            bail!("Line {}: missing date or sales field", line);
        };
        let date = parse_date(date).context(format!("Line {}: bad date {:?}", line, date))?;
        let sales: f64 = sales
            .parse()
            .context(format!("Line {}: bad sales value {:?}", line, sales))?;
        Ok(SalesObservation { date, sales })
    }
}
