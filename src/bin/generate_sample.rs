use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

use bike_brush::data::normalize::columns;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn season_for(date: NaiveDate) -> &'static str {
    match date.month() {
        12 | 1 | 2 => "Winter",
        3..=5 => "Spring",
        6..=8 => "Summer",
        _ => "Autumn",
    }
}

/// Commuter-shaped demand: peaks at 8 AM and 6 PM, quiet overnight.
fn hourly_demand(hour: u32) -> f64 {
    let h = hour as f64;
    let morning = 900.0 * (-(h - 8.0).powi(2) / 2.0).exp();
    let evening = 1300.0 * (-(h - 18.0).powi(2) / 6.0).exp();
    let daytime = if (7..=22).contains(&hour) { 250.0 } else { 60.0 };
    morning + evening + daytime
}

/// Column-oriented buffer of generated rows.
#[derive(Default)]
struct Table {
    date: Vec<String>,
    rented: Vec<i64>,
    hour: Vec<i64>,
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
    visibility: Vec<f64>,
    dew_point: Vec<f64>,
    solar: Vec<f64>,
    rainfall: Vec<f64>,
    snowfall: Vec<f64>,
    season: Vec<String>,
}

impl Table {
    fn len(&self) -> usize {
        self.date.len()
    }
}

fn generate(rng: &mut SimpleRng) -> Table {
    let start = NaiveDate::from_ymd_opt(2017, 12, 1).unwrap();
    let mut table = Table::default();

    for day in 0..365 {
        let date = start + Duration::days(day);
        let phase = (date.ordinal() as f64 - 200.0) / 365.0 * 2.0 * std::f64::consts::PI;
        let base_temp = 12.0 + 14.0 * phase.cos();
        let rainy = rng.next_f64() < 0.12;
        // Roughly one closed day a month: no rentals at all.
        let closed = rng.next_f64() < 0.03;

        for hour in 0..24u32 {
            let diurnal = -4.0 * ((hour as f64 - 14.0) / 24.0 * 2.0 * std::f64::consts::PI).cos();
            let temperature = base_temp + diurnal + rng.gauss(0.0, 1.5);
            let humidity = (55.0 + (if rainy { 30.0 } else { 0.0 }) + rng.gauss(0.0, 10.0)).clamp(10.0, 98.0);
            let rain = if rainy { rng.next_f64() * 3.0 } else { 0.0 };
            let snow = if rainy && temperature < 0.0 { rng.next_f64() * 2.0 } else { 0.0 };
            let solar = if (7..=18).contains(&hour) && !rainy {
                (((hour as f64 - 6.0) / 13.0 * std::f64::consts::PI).sin() * 2.5).max(0.0)
            } else {
                0.0
            };

            let comfort = (1.0 - ((temperature - 22.0) / 25.0).powi(2)).max(0.1);
            let weather = if rainy { 0.15 } else { 1.0 };
            let rented = if closed {
                0
            } else {
                (hourly_demand(hour) * comfort * weather + rng.gauss(0.0, 40.0)).max(0.0).round() as i64
            };

            table.date.push(date.format("%d/%m/%Y").to_string());
            table.rented.push(rented);
            table.hour.push(hour as i64);
            table.temperature.push((temperature * 10.0).round() / 10.0);
            table.humidity.push(humidity.round());
            table.wind.push((rng.next_f64() * 4.0 * 10.0).round() / 10.0);
            let clear_sky = if rainy { 400.0 } else { 2000.0 };
            table.visibility.push(clear_sky - (rng.next_f64() * 300.0).round());
            table.dew_point.push(((temperature - (100.0 - humidity) / 5.0) * 10.0).round() / 10.0);
            table.solar.push((solar * 100.0).round() / 100.0);
            table.rainfall.push((rain * 10.0).round() / 10.0);
            table.snowfall.push((snow * 10.0).round() / 10.0);
            table.season.push(season_for(date).to_string());
        }
    }
    table
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(columns::ALL)?;
    for i in 0..table.len() {
        writer.write_record([
            table.date[i].clone(),
            table.rented[i].to_string(),
            table.hour[i].to_string(),
            table.temperature[i].to_string(),
            table.humidity[i].to_string(),
            table.wind[i].to_string(),
            table.visibility[i].to_string(),
            table.dew_point[i].to_string(),
            table.solar[i].to_string(),
            table.rainfall[i].to_string(),
            table.snowfall[i].to_string(),
            table.season[i].clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(table: Table, path: &Path) -> Result<()> {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let int = |name: &str| Field::new(name, DataType::Int64, false);
    let float = |name: &str| Field::new(name, DataType::Float64, false);

    let schema = Arc::new(Schema::new(vec![
        text(columns::DATE),
        int(columns::RENTED_COUNT),
        int(columns::HOUR),
        float(columns::TEMPERATURE),
        float(columns::HUMIDITY),
        float(columns::WIND_SPEED),
        float(columns::VISIBILITY),
        float(columns::DEW_POINT),
        float(columns::SOLAR_RADIATION),
        float(columns::RAINFALL),
        float(columns::SNOWFALL),
        text(columns::SEASON),
    ]));

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(table.date)),
        Arc::new(Int64Array::from(table.rented)),
        Arc::new(Int64Array::from(table.hour)),
        Arc::new(Float64Array::from(table.temperature)),
        Arc::new(Float64Array::from(table.humidity)),
        Arc::new(Float64Array::from(table.wind)),
        Arc::new(Float64Array::from(table.visibility)),
        Arc::new(Float64Array::from(table.dew_point)),
        Arc::new(Float64Array::from(table.solar)),
        Arc::new(Float64Array::from(table.rainfall)),
        Arc::new(Float64Array::from(table.snowfall)),
        Arc::new(StringArray::from(table.season)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "sample_rentals.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let table = generate(&mut rng);
    let rows = table.len();

    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(table, path)?;
    } else {
        write_csv(&table, path)?;
    }

    log::info!("wrote {rows} hourly records to {}", path.display());
    println!("Wrote {rows} hourly records (365 days) to {output}");
    Ok(())
}
