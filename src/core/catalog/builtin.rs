// Shipped catalog data.
// Factors are exact definitions where one exists (1 ft = 0.3048 m, 1 lb = 0.45359237 kg).
// Currency rates are a fixed USD reference table, not live data.

use super::rules::{Formula, Rule};
use super::{Category, Unit};

fn identity(v: f64) -> f64 {
    v
}

static CELSIUS: [(&str, Formula); 3] = [
    ("celsius", identity),
    ("fahrenheit", |c: f64| c * 9.0 / 5.0 + 32.0),
    ("kelvin", |c: f64| c + 273.15),
];

static FAHRENHEIT: [(&str, Formula); 3] = [
    ("celsius", |f: f64| (f - 32.0) * 5.0 / 9.0),
    ("fahrenheit", identity),
    ("kelvin", |f: f64| (f - 32.0) * 5.0 / 9.0 + 273.15),
];

static KELVIN: [(&str, Formula); 3] = [
    ("celsius", |k: f64| k - 273.15),
    ("fahrenheit", |k: f64| (k - 273.15) * 9.0 / 5.0 + 32.0),
    ("kelvin", identity),
];

pub(super) fn categories() -> Vec<Category> {
    vec![length(), mass(), temperature(), volume(), time(), speed(), currency()]
}

fn length() -> Category {
    Category::new(
        "length",
        "Length",
        "ruler",
        vec![
            Unit::scaled("meter", "Meter", "m", 1.0)
                .with_trivia("The meter was originally defined in 1793 as one ten-millionth of the distance from the equator to the North Pole."),
            Unit::scaled("kilometer", "Kilometer", "km", 1000.0)
                .with_trivia("The kilometer was first introduced in 1799 during the French Revolution."),
            Unit::scaled("centimeter", "Centimeter", "cm", 0.01)
                .with_trivia("A centimeter is about the width of a large paperclip."),
            Unit::scaled("millimeter", "Millimeter", "mm", 0.001),
            Unit::scaled("inch", "Inch", "in", 0.0254)
                .with_trivia("An inch was originally based on the width of a man's thumb."),
            Unit::scaled("foot", "Foot", "ft", 0.3048)
                .with_trivia("The foot was originally based on the length of a human foot."),
            Unit::scaled("yard", "Yard", "yd", 0.9144)
                .with_trivia("A yard was originally the distance from King Henry I's nose to his outstretched thumb."),
            Unit::scaled("mile", "Mile", "mi", 1609.344)
                .with_trivia("The word \"mile\" comes from the Latin \"mille passus\" meaning one thousand paces."),
        ],
    )
    .with_default_pair("meter", "foot")
    .with_trivia(&[
        "The Great Pyramid of Giza was originally 146.5 meters (481 feet) tall.",
        "The longest river in the world is the Nile, stretching about 6,650 km (4,130 miles).",
        "A light-year is about 9.46 trillion kilometers (5.88 trillion miles).",
    ])
}

fn mass() -> Category {
    Category::new(
        "mass",
        "Mass",
        "weight",
        vec![
            Unit::scaled("kilogram", "Kilogram", "kg", 1.0)
                .with_trivia("The kilogram is the only SI base unit with a prefix (kilo) as part of its name."),
            Unit::scaled("gram", "Gram", "g", 0.001),
            Unit::scaled("milligram", "Milligram", "mg", 0.000_001),
            Unit::scaled("pound", "Pound", "lb", 0.453_592_37),
            Unit::scaled("ounce", "Ounce", "oz", 0.028_349_523_125),
            Unit::scaled("ton", "Metric Ton", "t", 1000.0),
            Unit::scaled("stone", "Stone", "st", 6.350_293_18),
        ],
    )
    .with_default_pair("kilogram", "pound")
    .with_trivia(&[
        "The largest animal on Earth, the blue whale, can weigh up to 200 tons.",
        "A single grain of sand typically weighs about 0.00063 grams.",
        "The average cloud weighs about 1.1 million pounds (500,000 kg)!",
    ])
}

fn temperature() -> Category {
    Category::new(
        "temperature",
        "Temperature",
        "thermometer-half",
        vec![
            Unit::new("celsius", "Celsius", "°C", Some(Rule::pairwise(&CELSIUS)))
                .with_trivia("The Celsius scale was originally defined by the freezing point (0°C) and boiling point (100°C) of water at sea level."),
            Unit::new("fahrenheit", "Fahrenheit", "°F", Some(Rule::pairwise(&FAHRENHEIT)))
                .with_trivia("The Fahrenheit scale was proposed by Daniel Gabriel Fahrenheit in 1724."),
            Unit::new("kelvin", "Kelvin", "K", Some(Rule::pairwise(&KELVIN)))
                .with_trivia("The Kelvin scale is an absolute temperature scale where 0K is absolute zero, the theoretical lowest temperature possible."),
        ],
    )
    .with_default_pair("celsius", "fahrenheit")
    .with_trivia(&[
        "The highest temperature ever recorded on Earth was 56.7°C (134°F) in Death Valley, California.",
        "Absolute zero is -273.15°C (-459.67°F), the lowest possible temperature.",
        "The average human body temperature is about 37°C (98.6°F).",
    ])
}

fn volume() -> Category {
    Category::new(
        "volume",
        "Volume",
        "flask",
        vec![
            Unit::scaled("liter", "Liter", "L", 1.0),
            Unit::scaled("milliliter", "Milliliter", "mL", 0.001),
            Unit::scaled("cubic_meter", "Cubic Meter", "m³", 1000.0),
            Unit::scaled("gallon", "Gallon (US)", "gal", 3.785_411_784),
            Unit::scaled("quart", "Quart (US)", "qt", 0.946_352_946),
            Unit::scaled("pint", "Pint (US)", "pt", 0.473_176_473),
            Unit::scaled("cup", "Cup (US)", "cup", 0.236_588_236_5),
            Unit::scaled("fluid_ounce", "Fluid Ounce (US)", "fl oz", 0.029_573_529_562_5),
        ],
    )
    .with_default_pair("liter", "gallon")
    .with_trivia(&[
        "An Olympic swimming pool holds about 2.5 million liters of water.",
        "A US gallon of water weighs about 8.34 pounds.",
        "The liter was defined in 1795 as the volume of a cube 10 cm on each side.",
    ])
}

fn time() -> Category {
    Category::new(
        "time",
        "Time",
        "clock",
        vec![
            Unit::scaled("second", "Second", "s", 1.0),
            Unit::scaled("millisecond", "Millisecond", "ms", 0.001),
            Unit::scaled("minute", "Minute", "min", 60.0),
            Unit::scaled("hour", "Hour", "h", 3600.0),
            Unit::scaled("day", "Day", "d", 86_400.0),
            Unit::scaled("week", "Week", "wk", 604_800.0),
            Unit::scaled("year", "Year", "yr", 31_536_000.0),
        ],
    )
    .with_default_pair("second", "minute")
    .with_trivia(&[
        "A day on Venus is longer than its year.",
        "The second is defined by 9,192,631,770 oscillations of a caesium-133 atom.",
        "Earth's rotation is slowing, lengthening the day by about 1.7 milliseconds per century.",
    ])
}

fn speed() -> Category {
    Category::new(
        "speed",
        "Speed",
        "tachometer-alt",
        vec![
            Unit::scaled("mps", "Meter per Second", "m/s", 1.0),
            Unit::scaled("kmh", "Kilometer per Hour", "km/h", 1.0 / 3.6),
            Unit::scaled("mph", "Mile per Hour", "mph", 0.447_04),
            Unit::scaled("knot", "Knot", "kn", 1852.0 / 3600.0),
            Unit::scaled("fps", "Foot per Second", "ft/s", 0.3048),
        ],
    )
    .with_default_pair("kmh", "mph")
    .with_trivia(&[
        "Light travels at about 299,792 kilometers per second.",
        "The peregrine falcon can dive at over 320 km/h (200 mph).",
        "Sound travels at about 343 meters per second in dry air at 20°C.",
    ])
}

fn currency() -> Category {
    // Units of currency per US dollar
    let per_usd = |id: &str, name: &str, symbol: &str, rate: f64| Unit::scaled(id, name, symbol, 1.0 / rate);

    Category::new(
        "currency",
        "Currency",
        "money-bill-wave",
        vec![
            per_usd("usd", "US Dollar", "$", 1.0),
            per_usd("eur", "Euro", "€", 0.92),
            per_usd("gbp", "British Pound", "£", 0.79),
            per_usd("jpy", "Japanese Yen", "¥", 149.5),
            per_usd("cad", "Canadian Dollar", "C$", 1.36),
            per_usd("aud", "Australian Dollar", "A$", 1.52),
            per_usd("inr", "Indian Rupee", "₹", 83.2),
        ],
    )
    .with_default_pair("usd", "eur")
    .with_trivia(&[
        "The US dollar is the most widely held reserve currency in the world.",
        "The euro is used by more than 340 million people every day.",
        "The British pound is the oldest currency still in use.",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_trivia() {
        for category in categories() {
            assert!(!category.trivia.is_empty(), "{} has no trivia", category.id);
        }
    }

    #[test]
    fn test_temperature_tables_cover_every_unit() {
        for table in [&CELSIUS, &FAHRENHEIT, &KELVIN] {
            let targets: Vec<&str> = table.iter().map(|(id, _)| *id).collect();
            assert_eq!(targets, vec!["celsius", "fahrenheit", "kelvin"]);
        }
    }
}
