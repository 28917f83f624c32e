//! Built-in categories, in menu order
//!
//! Where older tables disagreed on a constant, the exact published
//! definition wins (international yard and pound, US liquid gallon,
//! mean Gregorian year).

use std::f64::consts::PI;

use crate::affine::temperature_units;
use crate::category::{CategoryDefinition, LinearUnit};
use crate::density::cooking_table;

/// Seconds in a mean Gregorian year (365.2425 days)
const SECONDS_PER_YEAR: f64 = 31_556_952.0;

/// Kilograms in an international avoirdupois pound
const KG_PER_POUND: f64 = 0.45359237;

/// Meters in an international foot
const METERS_PER_FOOT: f64 = 0.3048;

/// Liters in a US liquid gallon
const LITERS_PER_GALLON: f64 = 3.785411784;

/// Standard gravity, used by the force-pound units
const STANDARD_GRAVITY: f64 = 9.80665;

pub fn builtin_categories() -> Vec<CategoryDefinition> {
    vec![
        length(),
        mass(),
        temperature(),
        volume(),
        area(),
        time(),
        speed(),
        pressure(),
        energy(),
        power(),
        force(),
        torque(),
        angle(),
        digital(),
        bandwidth(),
        frequency(),
        illumination(),
        radiation(),
        viscosity(),
        cooking(),
    ]
}

fn length() -> CategoryDefinition {
    CategoryDefinition::linear("length", "Length", "m", vec![
        LinearUnit::new("m", "Meters", 1.0),
        LinearUnit::new("cm", "Centimeters", 0.01),
        LinearUnit::new("mm", "Millimeters", 0.001),
        LinearUnit::new("km", "Kilometers", 1000.0),
        LinearUnit::new("in", "Inches", 0.0254),
        LinearUnit::new("ft", "Feet", METERS_PER_FOOT),
        LinearUnit::new("yd", "Yards", 0.9144),
        LinearUnit::new("mi", "Miles", 1609.344),
        LinearUnit::new("nmi", "Nautical Miles", 1852.0),
    ])
    .aliases(&["meter", "meters", "metre", "metres"], "m")
    .aliases(&["centimeter", "centimeters"], "cm")
    .aliases(&["millimeter", "millimeters"], "mm")
    .aliases(&["kilometer", "kilometers", "kilometre", "kilometres"], "km")
    .aliases(&["inch", "inches"], "in")
    .aliases(&["foot", "feet"], "ft")
    .aliases(&["yard", "yards"], "yd")
    .aliases(&["mile", "miles"], "mi")
}

fn mass() -> CategoryDefinition {
    CategoryDefinition::linear("mass", "Mass", "kg", vec![
        LinearUnit::new("kg", "Kilograms", 1.0),
        LinearUnit::new("g", "Grams", 0.001),
        LinearUnit::new("mg", "Milligrams", 0.000001),
        LinearUnit::new("lb", "Pounds", KG_PER_POUND),
        LinearUnit::new("oz", "Ounces", KG_PER_POUND / 16.0),
        LinearUnit::new("st", "Stone", KG_PER_POUND * 14.0),
        LinearUnit::new("t", "Tonnes", 1000.0),
    ])
    .aliases(&["kilogram", "kilograms"], "kg")
    .aliases(&["gram", "grams"], "g")
    .aliases(&["milligram", "milligrams"], "mg")
    .aliases(&["pound", "pounds", "lbs"], "lb")
    .aliases(&["ounce", "ounces"], "oz")
    .alias("stone", "st")
    .aliases(&["tonne", "tonnes", "metric ton"], "t")
}

fn temperature() -> CategoryDefinition {
    CategoryDefinition::affine("temperature", "Temperature", temperature_units())
        .aliases(&["C", "c", "°C", "degC", "celsius"], "Celsius")
        .aliases(&["F", "f", "°F", "degF", "fahrenheit"], "Fahrenheit")
        .aliases(&["K", "k", "kelvin"], "Kelvin")
        .aliases(&["R", "°R", "rankine"], "Rankine")
}

fn volume() -> CategoryDefinition {
    CategoryDefinition::linear("volume", "Volume", "l", vec![
        LinearUnit::new("l", "Liters", 1.0),
        LinearUnit::new("ml", "Milliliters", 0.001),
        LinearUnit::new("gal", "Gallons (US)", LITERS_PER_GALLON),
        LinearUnit::new("qt", "Quarts (US)", LITERS_PER_GALLON / 4.0),
        LinearUnit::new("pt", "Pints (US)", LITERS_PER_GALLON / 8.0),
        LinearUnit::new("cup", "Cups (US)", LITERS_PER_GALLON / 16.0),
        LinearUnit::new("fl_oz", "Fluid Ounces (US)", LITERS_PER_GALLON / 128.0),
    ])
    .aliases(&["L", "liter", "liters", "litre", "litres"], "l")
    .aliases(&["mL", "milliliter", "milliliters"], "ml")
    .aliases(&["gallon", "gallons"], "gal")
    .aliases(&["quart", "quarts"], "qt")
    .aliases(&["pint", "pints"], "pt")
    .alias("cups", "cup")
    .aliases(&["floz", "fl oz"], "fl_oz")
}

fn area() -> CategoryDefinition {
    CategoryDefinition::linear("area", "Area", "m2", vec![
        LinearUnit::new("m2", "Square Meters", 1.0),
        LinearUnit::new("cm2", "Square Centimeters", 0.0001),
        LinearUnit::new("km2", "Square Kilometers", 1_000_000.0),
        LinearUnit::new("ft2", "Square Feet", METERS_PER_FOOT * METERS_PER_FOOT),
        LinearUnit::new("acre", "Acres", 4046.8564224),
        LinearUnit::new("ha", "Hectares", 10_000.0),
    ])
    .aliases(&["m²", "sq m"], "m2")
    .aliases(&["ft²", "sq ft"], "ft2")
    .alias("acres", "acre")
    .alias("hectare", "ha")
}

fn time() -> CategoryDefinition {
    CategoryDefinition::linear("time", "Time", "s", vec![
        LinearUnit::new("s", "Seconds", 1.0),
        LinearUnit::new("ms", "Milliseconds", 0.001),
        LinearUnit::new("min", "Minutes", 60.0),
        LinearUnit::new("h", "Hours", 3600.0),
        LinearUnit::new("d", "Days", 86_400.0),
        LinearUnit::new("wk", "Weeks", 604_800.0),
        LinearUnit::new("mo", "Months (average)", SECONDS_PER_YEAR / 12.0),
        LinearUnit::new("y", "Years (average)", SECONDS_PER_YEAR),
        LinearUnit::new("century", "Centuries", SECONDS_PER_YEAR * 100.0),
    ])
    .aliases(&["sec", "second", "seconds"], "s")
    .aliases(&["minute", "minutes"], "min")
    .aliases(&["hr", "hour", "hours"], "h")
    .aliases(&["day", "days"], "d")
    .aliases(&["week", "weeks"], "wk")
    .aliases(&["month", "months"], "mo")
    .aliases(&["yr", "year", "years"], "y")
    .alias("centuries", "century")
}

fn speed() -> CategoryDefinition {
    CategoryDefinition::linear("speed", "Speed", "mps", vec![
        LinearUnit::new("mps", "Meters per Second", 1.0),
        LinearUnit::new("kph", "Kilometers per Hour", 1000.0 / 3600.0),
        LinearUnit::new("mph", "Miles per Hour", 1609.344 / 3600.0),
        LinearUnit::new("knots", "Knots", 1852.0 / 3600.0),
    ])
    .alias("m/s", "mps")
    .aliases(&["kmh", "km/h"], "kph")
    .alias("knot", "knots")
}

fn pressure() -> CategoryDefinition {
    CategoryDefinition::linear("pressure", "Pressure", "pa", vec![
        LinearUnit::new("pa", "Pascals", 1.0),
        LinearUnit::new("kpa", "Kilopascals", 1000.0),
        LinearUnit::new("bar", "Bar", 100_000.0),
        LinearUnit::new("psi", "Pounds per Square Inch", 6894.757293168),
        LinearUnit::new("atm", "Atmospheres", 101_325.0),
    ])
    .alias("Pa", "pa")
    .alias("kPa", "kpa")
}

fn energy() -> CategoryDefinition {
    CategoryDefinition::linear("energy", "Energy", "j", vec![
        LinearUnit::new("j", "Joules", 1.0),
        LinearUnit::new("kj", "Kilojoules", 1000.0),
        LinearUnit::new("cal", "Calories", 4.184),
        LinearUnit::new("kcal", "Kilocalories", 4184.0),
        LinearUnit::new("wh", "Watt-hours", 3600.0),
        LinearUnit::new("kwh", "Kilowatt-hours", 3_600_000.0),
    ])
    .alias("J", "j")
    .alias("kJ", "kj")
    .alias("Wh", "wh")
    .alias("kWh", "kwh")
}

fn power() -> CategoryDefinition {
    CategoryDefinition::linear("power", "Power", "w", vec![
        LinearUnit::new("w", "Watts", 1.0),
        LinearUnit::new("kw", "Kilowatts", 1000.0),
        // mechanical horsepower: 550 ft·lbf/s
        LinearUnit::new("hp", "Horsepower", 550.0 * METERS_PER_FOOT * KG_PER_POUND * STANDARD_GRAVITY),
    ])
    .alias("W", "w")
    .alias("kW", "kw")
}

fn force() -> CategoryDefinition {
    CategoryDefinition::linear("force", "Force", "n", vec![
        LinearUnit::new("n", "Newtons", 1.0),
        LinearUnit::new("dyn", "Dynes", 0.00001),
        LinearUnit::new("lbf", "Pound-force", KG_PER_POUND * STANDARD_GRAVITY),
    ])
    .alias("N", "n")
}

fn torque() -> CategoryDefinition {
    CategoryDefinition::linear("torque", "Torque", "n_m", vec![
        LinearUnit::new("n_m", "Newton-meters", 1.0),
        LinearUnit::new("ft_lbf", "Foot-pounds", METERS_PER_FOOT * KG_PER_POUND * STANDARD_GRAVITY),
    ])
    .aliases(&["N·m", "Nm"], "n_m")
    .aliases(&["ft·lbf", "ft-lb"], "ft_lbf")
}

fn angle() -> CategoryDefinition {
    CategoryDefinition::linear("angle", "Angle", "rad", vec![
        LinearUnit::new("rad", "Radians", 1.0),
        LinearUnit::new("deg", "Degrees", PI / 180.0),
    ])
    .aliases(&["radian", "radians"], "rad")
    .aliases(&["°", "degree", "degrees"], "deg")
}

fn digital() -> CategoryDefinition {
    CategoryDefinition::linear("digital", "Digital Storage", "b", vec![
        LinearUnit::new("b", "Bytes", 1.0),
        LinearUnit::new("bit", "Bits", 0.125),
        LinearUnit::new("kb", "Kilobytes (1024 B)", 1024.0),
        LinearUnit::new("mb", "Megabytes", 1_048_576.0),
        LinearUnit::new("gb", "Gigabytes", 1_073_741_824.0),
        LinearUnit::new("tb", "Terabytes", 1_099_511_627_776.0),
    ])
    .with_note("Uses binary prefixes (1 kb = 1024 b)")
    .aliases(&["B", "byte", "bytes"], "b")
    .alias("bits", "bit")
    .aliases(&["KiB", "KB"], "kb")
    .aliases(&["MiB", "MB"], "mb")
    .aliases(&["GiB", "GB"], "gb")
    .aliases(&["TiB", "TB"], "tb")
}

fn bandwidth() -> CategoryDefinition {
    CategoryDefinition::linear("bandwidth", "Data Transfer Rate", "Bps", vec![
        LinearUnit::new("Bps", "Bytes per Second", 1.0),
        LinearUnit::new("kBps", "Kilobytes per Second (1000)", 1000.0),
        LinearUnit::new("MBps", "Megabytes per Second (1000)", 1_000_000.0),
        LinearUnit::new("Mbps", "Megabits per Second", 125_000.0),
        LinearUnit::new("Gbps", "Gigabits per Second", 125_000_000.0),
    ])
    .with_note("Uses decimal prefixes (1 kBps = 1000 Bps)")
    .alias("B/s", "Bps")
    .aliases(&["KBps", "kB/s"], "kBps")
    .alias("MB/s", "MBps")
    .alias("Mbit/s", "Mbps")
    .alias("Gbit/s", "Gbps")
}

fn frequency() -> CategoryDefinition {
    CategoryDefinition::linear("frequency", "Frequency", "hz", vec![
        LinearUnit::new("hz", "Hertz", 1.0),
        LinearUnit::new("khz", "Kilohertz", 1e3),
        LinearUnit::new("mhz", "Megahertz", 1e6),
        LinearUnit::new("ghz", "Gigahertz", 1e9),
        LinearUnit::new("rpm", "Revolutions per Minute", 1.0 / 60.0),
    ])
    .alias("Hz", "hz")
    .alias("kHz", "khz")
    .alias("MHz", "mhz")
    .alias("GHz", "ghz")
}

fn illumination() -> CategoryDefinition {
    CategoryDefinition::linear("illumination", "Illumination", "lx", vec![
        LinearUnit::new("lx", "Lux", 1.0),
        // one lumen per square foot
        LinearUnit::new("fc", "Foot-candles", 1.0 / (METERS_PER_FOOT * METERS_PER_FOOT)),
    ])
    .alias("lux", "lx")
}

fn radiation() -> CategoryDefinition {
    CategoryDefinition::linear("radiation", "Radiation Dose", "sv", vec![
        LinearUnit::new("sv", "Sieverts", 1.0),
        LinearUnit::new("msv", "Millisieverts", 0.001),
        LinearUnit::new("rem", "Rem", 0.01),
    ])
    .alias("Sv", "sv")
    .alias("mSv", "msv")
}

fn viscosity() -> CategoryDefinition {
    CategoryDefinition::linear("viscosity", "Viscosity", "pa_s", vec![
        LinearUnit::new("pa_s", "Pascal-seconds", 1.0),
        LinearUnit::new("p", "Poise", 0.1),
        LinearUnit::new("cp", "Centipoise", 0.001),
    ])
    .alias("Pa·s", "pa_s")
    .alias("P", "p")
    .alias("cP", "cp")
}

fn cooking() -> CategoryDefinition {
    CategoryDefinition::density("cooking", "Cooking", "g", cooking_table())
        .with_note("Volume to weight via a grams-per-US-cup density (1 cup = 236.588 ml)")
        .aliases(&["cups"], "cup")
        .aliases(&["tablespoon", "tablespoons", "Tbsp"], "tbsp")
        .aliases(&["teaspoon", "teaspoons"], "tsp")
        .aliases(&["mL", "milliliter", "milliliters"], "ml")
        .aliases(&["gram", "grams"], "g")
        .aliases(&["kilogram", "kilograms"], "kg")
        .aliases(&["ounce", "ounces"], "oz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_unique_and_ordered() {
        let keys: Vec<String> = builtin_categories().into_iter().map(|c| c.key).collect();
        assert_eq!(keys.first().map(String::as_str), Some("length"));
        assert_eq!(keys.last().map(String::as_str), Some("cooking"));
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), keys.len());
    }

    #[test]
    fn test_exact_constants() {
        let cats = builtin_categories();
        let factor = |cat: &str, unit: &str| -> f64 {
            let def = cats.iter().find(|c| c.key == cat).unwrap();
            match &def.table {
                crate::UnitTable::Linear { units } => {
                    units.iter().find(|u| u.symbol == unit).unwrap().factor
                }
                _ => panic!("not linear"),
            }
        };
        assert_eq!(factor("length", "mi"), 1609.344);
        assert_eq!(factor("mass", "lb"), 0.45359237);
        assert!((factor("mass", "oz") - 0.028349523125).abs() < 1e-15);
        assert!((factor("power", "hp") - 745.69987158227022).abs() < 1e-9);
        assert!((factor("force", "lbf") - 4.4482216152605).abs() < 1e-12);
        assert!((factor("illumination", "fc") - 10.76391041671).abs() < 1e-9);
    }

    #[test]
    fn test_aliases_resolve() {
        let cats = builtin_categories();
        for cat in &cats {
            for (alias, symbol) in &cat.aliases {
                assert_eq!(
                    cat.resolve_unit(alias),
                    Some(symbol.as_str()),
                    "alias '{}' in '{}' does not resolve",
                    alias,
                    cat.key
                );
            }
        }
    }
}
