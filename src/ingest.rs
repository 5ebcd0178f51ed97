//! Ingestion boundary: untrusted JSON/CSV records into typed [`RawTrade`]s.
//!
//! Individual malformed records are dropped with a warning; only document
//! level problems are reported as errors.

use crate::domain::{check_trade_range, Decimal, OrderType, RawTrade, TimeSec};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid JSON file: {0}")]
    InvalidJson(String),
    #[error("File must contain a list of trades")]
    NotAList,
    #[error("Invalid CSV file: {0}")]
    InvalidCsv(String),
}

/// Parse trade records, keeping the ones that validate.
pub fn parse_trade_values(values: &[Value]) -> Vec<RawTrade> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match RawTrade::from_json(v) {
            Ok(trade) => Some(trade),
            Err(e) => {
                warn!("Dropping trade record #{}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Parse an uploaded JSON document holding an array of trade records.
pub fn parse_json_document(bytes: &[u8]) -> Result<Vec<RawTrade>, IngestError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| IngestError::InvalidJson(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(parse_trade_values(&items)),
        _ => Err(IngestError::NotAList),
    }
}

#[derive(Debug, Deserialize)]
struct CsvTradeRow {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    side: Option<String>,
    #[serde(default)]
    outcome: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "conditionId")]
    condition_id: Option<String>,
}

impl CsvTradeRow {
    fn into_raw_trade(self) -> Result<RawTrade, String> {
        let number = |cell: Option<String>, name: &str| -> Result<Decimal, String> {
            match non_empty(cell) {
                None => Ok(Decimal::zero()),
                Some(s) => Decimal::parse(&s).map_err(|_| format!("field '{}' is not numeric", name)),
            }
        };

        let timestamp = match non_empty(self.timestamp) {
            None => TimeSec::default(),
            Some(s) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .map(TimeSec::new)
                .ok_or_else(|| "field 'timestamp' is not numeric".to_string())?,
        };

        let price = number(self.price, "price")?;
        let size = number(self.size, "size")?;
        check_trade_range(price, size).map_err(|e| e.to_string())?;

        Ok(RawTrade {
            timestamp,
            price,
            size,
            outcome: non_empty(self.outcome),
            order_type: OrderType::from_label(self.side.as_deref()),
            title: non_empty(self.title),
            condition_id: non_empty(self.condition_id),
        })
    }
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an uploaded CSV document with a header row.
///
/// Columns are matched by name (`timestamp`, `price`, `size`, `side`,
/// `outcome`, `title`, `conditionId`); unknown columns are ignored.
pub fn parse_csv_document(bytes: &[u8]) -> Result<Vec<RawTrade>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::InvalidCsv(e.to_string()))?
        .clone();
    if !headers.iter().any(|h| h == "price") || !headers.iter().any(|h| h == "size") {
        return Err(IngestError::InvalidCsv(
            "header must contain price and size columns".to_string(),
        ));
    }

    let mut trades = Vec::new();
    for (i, row) in reader.deserialize::<CsvTradeRow>().enumerate() {
        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(CsvTradeRow::into_raw_trade);
        match parsed {
            Ok(trade) => trades.push(trade),
            Err(e) => warn!("Dropping CSV row #{}: {}", i + 1, e),
        }
    }

    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    #[test]
    fn test_parse_trade_values_drops_bad_records() {
        let values = vec![
            json!({"price": 0.4, "size": 10, "timestamp": 1, "outcome": "Up"}),
            json!({"price": "abc", "size": 10, "timestamp": 2}),
            json!(42),
            json!({"price": 0.35, "size": 8, "timestamp": 3, "outcome": "Down"}),
        ];
        let trades = parse_trade_values(&values);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price, d("0.4"));
        assert_eq!(trades[1].price, d("0.35"));
    }

    #[test]
    fn test_parse_json_document_drops_out_of_range_records() {
        let body = br#"[
            {"price": 7, "size": -5, "timestamp": 1, "outcome": "Up"},
            {"price": "79228162514264337593543950335", "size": 2, "timestamp": 2, "outcome": "Up"},
            {"price": 0.5, "size": -1, "timestamp": 3, "outcome": "Down"},
            {"price": 0.5, "size": 2, "timestamp": 4, "outcome": "Down"}
        ]"#;
        let trades = parse_json_document(body).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].timestamp, TimeSec::new(4));
    }

    #[test]
    fn test_parse_json_document() {
        let body = br#"[{"price": 0.4, "size": 10, "timestamp": 1, "side": "BUY", "outcome": "Up", "title": "BTC"}]"#;
        let trades = parse_json_document(body).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].title.as_deref(), Some("BTC"));
    }

    #[test]
    fn test_parse_json_document_requires_list() {
        assert!(matches!(
            parse_json_document(br#"{"trades": []}"#),
            Err(IngestError::NotAList)
        ));
        assert!(matches!(
            parse_json_document(b"not json"),
            Err(IngestError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_json_document_empty_list() {
        assert!(parse_json_document(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_csv_document() {
        let body = "timestamp,price,size,side,outcome,title\n\
                    100,0.40,10,BUY,Up,BTC Up or Down\n\
                    200,0.60,5,SELL,Up,BTC Up or Down\n\
                    300,oops,8,BUY,Down,BTC Up or Down\n\
                    400,0.35,8,,Down,\n";
        let trades = parse_csv_document(body.as_bytes()).unwrap();

        assert_eq!(trades.len(), 3);
        assert_eq!(trades[0].timestamp, TimeSec::new(100));
        assert_eq!(trades[1].order_type, OrderType::Sell);
        assert_eq!(trades[2].order_type, OrderType::Buy);
        assert_eq!(trades[2].price, d("0.35"));
        assert_eq!(trades[2].title, None);
        assert_eq!(trades[0].title.as_deref(), Some("BTC Up or Down"));
    }

    #[test]
    fn test_parse_csv_drops_out_of_range_rows() {
        let body = "timestamp,price,size,outcome\n\
                    1,1.5,10,Up\n\
                    2,0.40,-10,Up\n\
                    3,79228162514264337593543950335,2,Up\n\
                    4,0.40,10,Up\n";
        let trades = parse_csv_document(body.as_bytes()).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].timestamp, TimeSec::new(4));
    }

    #[test]
    fn test_parse_csv_requires_price_and_size() {
        let body = "timestamp,outcome\n1,Up\n";
        assert!(matches!(
            parse_csv_document(body.as_bytes()),
            Err(IngestError::InvalidCsv(_))
        ));
    }
}
