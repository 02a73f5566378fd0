use shoe_who_domain::{BoardState, Catalog, CatalogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub filename: String,
    pub caption: String,
    pub dimmed: bool,
}

/// Everything the window draws for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub featured: Option<CellView>,
    pub cells: Vec<CellView>,
}

pub fn present_board(catalog: &Catalog, board: &BoardState) -> BoardView {
    let cells = board
        .selection()
        .iter()
        .filter_map(|filename| catalog.find(filename))
        .map(|entry| cell(entry, board.is_toggled(&entry.filename)))
        .collect();
    let featured = board
        .featured()
        .and_then(|filename| catalog.find(filename))
        .map(|entry| cell(entry, false));

    BoardView { featured, cells }
}

pub fn present_board_text(view: &BoardView) -> String {
    let mut lines = Vec::with_capacity(view.cells.len() + 1);
    match &view.featured {
        Some(featured) => lines.push(format!("featured\t{}", one_line(featured))),
        None => lines.push("featured\t-".to_string()),
    }
    for (index, cell) in view.cells.iter().enumerate() {
        let mark = if cell.dimmed { "x" } else { " " };
        lines.push(format!("{:>2} [{mark}]\t{}", index + 1, one_line(cell)));
    }
    lines.join("\n")
}

fn cell(entry: &CatalogEntry, dimmed: bool) -> CellView {
    CellView {
        filename: entry.filename.clone(),
        caption: entry.caption(),
        dimmed,
    }
}

fn one_line(cell: &CellView) -> String {
    format!("{}\t{}", cell.filename, cell.caption.replace('\n', " | "))
}
