// Price range value object
// Fixed bucket ladder, lower bound inclusive

pub fn price_range(amount: f64) -> &'static str {
    if amount < 5_000.0 {
        "0-5000"
    } else if amount < 10_000.0 {
        "5000-10000"
    } else if amount < 20_000.0 {
        "10000-20000"
    } else if amount < 50_000.0 {
        "20000-50000"
    } else {
        "50000+"
    }
}
