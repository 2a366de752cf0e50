use std::fmt::Write;

use minefield_core::{CellView, GameState, Snapshot};

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
    }
}

pub fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.state {
        GameState::InProgress => format!(
            "{} mines, {} safe cells left",
            snapshot.mine_count, snapshot.hidden_safe_count
        ),
        GameState::Won => "You won!".to_string(),
        GameState::Lost => "Boom! You lost.".to_string(),
    }
}

/// Text grid with row labels on the left and the last digit of each column index on top.
pub fn render_text(snapshot: &Snapshot) -> String {
    let (rows, columns) = snapshot.size;
    let label_width = rows.saturating_sub(1).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:label_width$} ", "");
    for column in 0..columns {
        let _ = write!(out, " {}", column % 10);
    }
    out.push('\n');

    for (row, cells) in snapshot.rows().enumerate() {
        let _ = write!(out, "{row:>label_width$} ");
        for cell in cells {
            out.push(' ');
            out.push(glyph(cell));
        }
        out.push('\n');
    }

    out.push_str(&status_line(snapshot));
    out
}
