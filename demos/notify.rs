use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Sensor {
    readings: Vec<u16>,
}

impl Sensor {
    fn average(&self) -> u16 {
        let sum: u32 = self.readings.iter().map(|&r| u32::from(r)).sum();
        u16::try_from(sum / self.readings.len() as u32).unwrap_or(u16::MAX)
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Every recovered fault in the program ends up in the log.
    tryme::global().replace_catch_action(tryme::hooks::trace());

    let sensors = [
        Sensor { readings: vec![10, 12, 14] },
        Sensor { readings: Vec::new() },
    ];

    for sensor in &sensors {
        let average = tryme::attempt_or(0, || sensor.average());
        println!("{sensor:?} -> average {average}");
    }

    let threshold = tryme::attempt_result_or(100, || "eighty".parse::<u16>());
    println!("threshold {threshold}");
}
