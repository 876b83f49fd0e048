use askama::Template;

use crate::models::deal::Stage;
use crate::pipeline::Board;

use super::PageContext;

#[derive(Template)]
#[template(path = "deals/board.html")]
pub struct BoardTemplate {
    pub ctx: PageContext,
    pub board: Board,
    pub stages: &'static [Stage],
}

impl BoardTemplate {
    pub fn new(ctx: PageContext, board: Board) -> Self {
        Self { ctx, board, stages: &Stage::ALL }
    }

    pub fn money(&self, value: impl std::borrow::Borrow<f64>) -> String {
        money(*value.borrow())
    }
}

/// Whole-unit money label, e.g. `$45,000`.
pub fn money(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 { format!("-${grouped}") } else { format!("${grouped}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(45000.0), "$45,000");
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(999.6), "$1,000");
        assert_eq!(money(-1234567.0), "-$1,234,567");
    }
}
