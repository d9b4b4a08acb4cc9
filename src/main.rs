use std::collections::HashMap;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use rand::Rng;
use scan_bridge::engine::bridge::loopback::{LoopbackRuntime, LoopbackTable};
use scan_bridge::engine::bridge::predicate::ColumnValueRange;
use scan_bridge::engine::bridge::BatchConnector;
use scan_bridge::engine::core::Block;
use scan_bridge::engine::types::{Datum, PrimitiveType, TypeDescriptor};
use scan_bridge::logging;
use scan_bridge::shared::config::CONFIG;
use scan_bridge::shared::datetime::packed::DateV2Value;
use tracing::info;

#[derive(Parser)]
#[command(name = "scan_bridge")]
#[command(about = "Runs one batch scan against an in-process scanner", long_about = None)]
struct Args {
    /// Rows in the synthetic table (defaults to connector.rows)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Maximum rows per batch (defaults to connector.batch_size)
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Push `id >= MIN_ID` down to the scanner
    #[arg(long)]
    min_id: Option<i64>,

    /// Rows to print after the scan
    #[arg(short, long, default_value = "5")]
    preview: usize,
}

fn schema() -> Vec<(&'static str, TypeDescriptor)> {
    vec![
        ("id", TypeDescriptor::new(PrimitiveType::BigInt).not_null()),
        ("name", TypeDescriptor::varchar(32)),
        ("amount", TypeDescriptor::decimal(12, 2)),
        ("day", TypeDescriptor::new(PrimitiveType::DateV2)),
    ]
}

fn synthetic_table(rows: usize) -> anyhow::Result<LoopbackTable> {
    let mut rng = rand::thread_rng();
    let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid epoch")?;

    let mut columns: Vec<Vec<Option<Datum>>> = vec![Vec::with_capacity(rows); 4];
    for i in 0..rows {
        columns[0].push(Some(Datum::Int64(i as i64)));
        columns[1].push(
            (!rng.gen_bool(0.1)).then(|| Datum::utf8(&format!("customer_{}", rng.gen_range(0..500)))),
        );
        columns[2].push(Some(Datum::Decimal64(rng.gen_range(0..1_000_000))));
        let day = epoch + Duration::days(rng.gen_range(0..366));
        columns[3].push(Some(Datum::DateV2(DateV2Value::from_naive(day))));
    }

    let mut builder = LoopbackTable::builder();
    for ((name, desc), values) in schema().into_iter().zip(columns) {
        builder = builder.column(name, desc, values);
    }
    Ok(builder.build()?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let cfg = &CONFIG.connector;
    let rows = args.rows.unwrap_or(cfg.rows);
    let batch_size = args.batch_size.unwrap_or(cfg.batch_size);
    info!(rows, batch_size, class = %cfg.scanner_class, "Starting scan probe");

    let runtime = LoopbackRuntime::new().with_table(&cfg.scanner_class, synthetic_table(rows)?);
    let schema = schema();
    let mut connector = BatchConnector::for_schema(&cfg.scanner_class, HashMap::new(), &schema);

    let ranges = args.min_id.map(|min| {
        HashMap::from([("id".to_string(), ColumnValueRange::at_least(Datum::Int64(min)))])
    });
    connector.init(ranges.as_ref())?;
    connector.open(&runtime, batch_size)?;

    let mut block = Block::from_schema(&schema)?;
    let mut batches = 0usize;
    loop {
        let next = connector.get_next_block(&mut block)?;
        if next.eof {
            break;
        }
        batches += 1;
        println!("batch {:>4}: {} rows", batches, next.rows_read);
    }
    let total = connector.rows_read();
    connector.close()?;

    println!("total: {} rows in {} batches", total, batches);
    for row in 0..args.preview.min(block.rows()) {
        let cells: Vec<String> = block
            .columns()
            .iter()
            .map(|c| match c.column.datum_at(row) {
                Some(d) => format!("{}={}", c.name, d),
                None => format!("{}=NULL", c.name),
            })
            .collect();
        println!("  {}", cells.join(" "));
    }

    Ok(())
}
