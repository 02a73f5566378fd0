use std::path::Path;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::RngCore;
use shoe_who_domain::{BoardState, Catalog, BOARD_SIZE};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, BoardFileStore, BoardOutcome, CatalogSource, ExportBoardCommand, FilePicker,
    ImportBoardCommand, NewBoardCommand, ToggleCellCommand, JSON_FILTER,
};

pub const EXPORT_FILE_NAME: &str = "ExportedBoard.json";

/// Owns the catalog snapshot and the board dealt from it.
///
/// Every operation is best effort: a failure is logged and leaves the
/// previous catalog and board untouched.
pub struct BoardService {
    source: Box<dyn CatalogSource>,
    files: Box<dyn BoardFileStore>,
    picker: Box<dyn FilePicker>,
    rng: Box<dyn RngCore>,
    catalog: Catalog,
    board: BoardState,
}

impl BoardService {
    pub fn new(
        source: Box<dyn CatalogSource>,
        files: Box<dyn BoardFileStore>,
        picker: Box<dyn FilePicker>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        Self {
            source,
            files,
            picker,
            rng,
            catalog: Catalog::default(),
            board: BoardState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn new_board(&mut self, _command: NewBoardCommand) -> BoardOutcome {
        match self.deal_from_source() {
            Ok(()) => {
                info!(
                    cells = self.board.selection().len(),
                    catalog = self.catalog.len(),
                    featured = ?self.board.featured(),
                    "dealt new board"
                );
                BoardOutcome::Updated
            }
            Err(error) => {
                warn!(%error, "new board failed, keeping current board");
                BoardOutcome::Failed(error.to_string())
            }
        }
    }

    pub fn toggle_selection(&mut self, command: ToggleCellCommand) -> BoardOutcome {
        let toggled = self.board.toggle(&command.filename);
        debug!(filename = %command.filename, toggled, "toggled cell");
        BoardOutcome::Updated
    }

    pub fn export_board(&self, command: ExportBoardCommand) -> BoardOutcome {
        let Some(path) = command
            .path
            .or_else(|| self.picker.save(EXPORT_FILE_NAME, &JSON_FILTER))
        else {
            debug!("export cancelled");
            return BoardOutcome::Cancelled;
        };

        match self.write_board(&path) {
            Ok(count) => {
                info!(path = %path.display(), entries = count, "exported board");
                BoardOutcome::Exported(path)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "export failed");
                BoardOutcome::Failed(error.to_string())
            }
        }
    }

    pub fn import_board(&mut self, command: ImportBoardCommand) -> BoardOutcome {
        let Some(path) = command.path.or_else(|| self.picker.open(&JSON_FILTER)) else {
            debug!("import cancelled");
            return BoardOutcome::Cancelled;
        };

        match self.read_board(&path) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    cells = self.board.selection().len(),
                    featured = ?self.board.featured(),
                    "imported board"
                );
                BoardOutcome::Imported(path)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "import failed, keeping current board");
                BoardOutcome::Failed(error.to_string())
            }
        }
    }

    fn deal_from_source(&mut self) -> Result<(), ApplicationError> {
        let mut entries = self.source.load_catalog()?;
        entries.shuffle(self.rng.as_mut());
        let catalog = Catalog::new(entries)?;
        self.install(catalog, BOARD_SIZE);
        Ok(())
    }

    fn write_board(&self, path: &Path) -> Result<usize, ApplicationError> {
        let entries = self.catalog.subset(self.board.selection());
        self.files.write_board(path, &entries)?;
        Ok(entries.len())
    }

    fn read_board(&mut self, path: &Path) -> Result<(), ApplicationError> {
        let catalog = Catalog::new(self.files.read_board(path)?)?;
        let size = catalog.len();
        self.install(catalog, size);
        Ok(())
    }

    fn install(&mut self, catalog: Catalog, size: usize) {
        let board = BoardState::from_catalog(&catalog, size);
        let featured = board.selection().choose(self.rng.as_mut()).cloned();
        self.board = board.with_featured(featured);
        self.catalog = catalog;
    }
}

impl std::fmt::Debug for BoardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardService")
            .field("catalog", &self.catalog.len())
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap, VecDeque};
    use std::path::PathBuf;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shoe_who_domain::CatalogEntry;

    use super::*;
    use crate::FileFilter;

    fn entry(filename: &str) -> CatalogEntry {
        CatalogEntry {
            filename: filename.to_string(),
            display_name: format!("Contestant {filename}"),
            country: "UK".to_string(),
            season: "Series 3".to_string(),
        }
    }

    fn entries(count: usize) -> Vec<CatalogEntry> {
        (0..count).map(|index| entry(&format!("{index}.png"))).collect()
    }

    struct FakeSource {
        entries: Option<Vec<CatalogEntry>>,
    }

    impl CatalogSource for FakeSource {
        fn load_catalog(&self) -> Result<Vec<CatalogEntry>, ApplicationError> {
            self.entries
                .clone()
                .ok_or_else(|| ApplicationError::ResourceLoad("Taskmaster.json missing".to_string()))
        }
    }

    /// Answers each load with the next queued catalog; `None` fails the load.
    struct ScriptedSource {
        loads: RefCell<VecDeque<Option<Vec<CatalogEntry>>>>,
    }

    impl CatalogSource for ScriptedSource {
        fn load_catalog(&self) -> Result<Vec<CatalogEntry>, ApplicationError> {
            self.loads
                .borrow_mut()
                .pop_front()
                .flatten()
                .ok_or_else(|| {
                    ApplicationError::ResourceLoad("Taskmaster.json unreadable".to_string())
                })
        }
    }

    #[derive(Default, Clone)]
    struct FakeFiles {
        stored: Rc<RefCell<HashMap<PathBuf, Vec<CatalogEntry>>>>,
    }

    impl BoardFileStore for FakeFiles {
        fn write_board(
            &self,
            path: &Path,
            entries: &[CatalogEntry],
        ) -> Result<(), ApplicationError> {
            if path.starts_with("/readonly") {
                return Err(ApplicationError::Io("permission denied".to_string()));
            }
            self.stored
                .borrow_mut()
                .insert(path.to_path_buf(), entries.to_vec());
            Ok(())
        }

        fn read_board(&self, path: &Path) -> Result<Vec<CatalogEntry>, ApplicationError> {
            if path.starts_with("/malformed") {
                return Err(ApplicationError::Parse("expected value at line 1".to_string()));
            }
            self.stored
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| ApplicationError::Io(format!("no such file: {}", path.display())))
        }
    }

    #[derive(Default, Clone)]
    struct FakePicker {
        answer: Option<PathBuf>,
        requests: Rc<RefCell<Vec<(Option<String>, FileFilter)>>>,
    }

    impl FilePicker for FakePicker {
        fn save(&self, suggested_name: &str, filter: &FileFilter) -> Option<PathBuf> {
            self.requests
                .borrow_mut()
                .push((Some(suggested_name.to_string()), *filter));
            self.answer.clone()
        }

        fn open(&self, filter: &FileFilter) -> Option<PathBuf> {
            self.requests.borrow_mut().push((None, *filter));
            self.answer.clone()
        }
    }

    fn service_with(
        catalog: Option<Vec<CatalogEntry>>,
        files: FakeFiles,
        picker: FakePicker,
        seed: u64,
    ) -> BoardService {
        BoardService::new(
            Box::new(FakeSource { entries: catalog }),
            Box::new(files),
            Box::new(picker),
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    fn service(count: usize) -> BoardService {
        service_with(
            Some(entries(count)),
            FakeFiles::default(),
            FakePicker::default(),
            7,
        )
    }

    fn selection_set(service: &BoardService) -> BTreeSet<String> {
        service.board().selection().iter().cloned().collect()
    }

    #[test]
    fn new_board_deals_at_most_board_size_cells() {
        for count in [0, 1, 5, 24, 25, 60] {
            let mut service = service(count);
            assert_eq!(service.new_board(NewBoardCommand), BoardOutcome::Updated);
            let board = service.board();
            assert_eq!(board.selection().len(), count.min(BOARD_SIZE));
            assert!(board.toggled().is_empty());
            assert!(board
                .selection()
                .iter()
                .all(|filename| service.catalog().contains(filename)));
            match board.featured() {
                Some(featured) => assert!(board.selection().iter().any(|f| f == featured)),
                None => assert_eq!(count, 0),
            }
        }
    }

    #[test]
    fn new_board_on_two_entries_is_a_permutation() {
        let mut service = service(2);
        service.new_board(NewBoardCommand);
        let mut selection = service.board().selection().to_vec();
        selection.sort();
        assert_eq!(selection, vec!["0.png", "1.png"]);
        let featured = service.board().featured().expect("featured");
        assert!(featured == "0.png" || featured == "1.png");
    }

    #[test]
    fn new_board_clears_toggles() {
        let mut service = service(10);
        service.new_board(NewBoardCommand);
        let first = service.board().selection()[0].clone();
        service.toggle_selection(ToggleCellCommand { filename: first });
        assert_eq!(service.board().toggled().len(), 1);

        service.new_board(NewBoardCommand);
        assert!(service.board().toggled().is_empty());
    }

    #[test]
    fn same_seed_deals_same_board() {
        let mut left = service(40);
        let mut right = service(40);
        left.new_board(NewBoardCommand);
        right.new_board(NewBoardCommand);
        assert_eq!(left.board(), right.board());
        assert_eq!(left.catalog(), right.catalog());
    }

    #[test]
    fn failed_first_load_leaves_board_empty() {
        let mut service = service_with(None, FakeFiles::default(), FakePicker::default(), 1);
        let outcome = service.new_board(NewBoardCommand);
        assert!(matches!(outcome, BoardOutcome::Failed(_)));
        assert!(service.board().selection().is_empty());
        assert!(service.catalog().is_empty());
    }

    #[test]
    fn duplicate_catalog_entries_fail_first_deal() {
        let mut service = service_with(
            Some(vec![entry("a.png"), entry("a.png")]),
            FakeFiles::default(),
            FakePicker::default(),
            1,
        );
        assert!(matches!(
            service.new_board(NewBoardCommand),
            BoardOutcome::Failed(_)
        ));
        assert!(service.board().selection().is_empty());
    }

    fn reloading_service(second_load: Option<Vec<CatalogEntry>>) -> BoardService {
        let source = ScriptedSource {
            loads: RefCell::new(VecDeque::from([Some(entries(5)), second_load])),
        };
        BoardService::new(
            Box::new(source),
            Box::new(FakeFiles::default()),
            Box::new(FakePicker::default()),
            Box::new(StdRng::seed_from_u64(9)),
        )
    }

    #[test]
    fn failed_reload_keeps_dealt_board() {
        let mut service = reloading_service(None);
        assert_eq!(service.new_board(NewBoardCommand), BoardOutcome::Updated);
        let first = service.board().selection()[1].clone();
        service.toggle_selection(ToggleCellCommand { filename: first });
        let board = service.board().clone();
        let catalog = service.catalog().clone();
        assert_eq!(board.selection().len(), 5);

        assert!(matches!(
            service.new_board(NewBoardCommand),
            BoardOutcome::Failed(_)
        ));
        assert_eq!(service.board(), &board);
        assert_eq!(service.catalog(), &catalog);
    }

    #[test]
    fn reload_with_duplicates_keeps_dealt_board() {
        let mut service = reloading_service(Some(vec![entry("x.png"), entry("x.png")]));
        service.new_board(NewBoardCommand);
        let board = service.board().clone();
        let catalog = service.catalog().clone();

        assert!(matches!(
            service.new_board(NewBoardCommand),
            BoardOutcome::Failed(_)
        ));
        assert_eq!(service.board(), &board);
        assert_eq!(service.catalog(), &catalog);
    }

    #[test]
    fn import_with_duplicates_or_bad_json_keeps_state() {
        let files = FakeFiles::default();
        files.stored.borrow_mut().insert(
            PathBuf::from("/boards/dupes.json"),
            vec![entry("a.png"), entry("b.png"), entry("a.png")],
        );
        let mut service = service_with(Some(entries(8)), files, FakePicker::default(), 2);
        service.new_board(NewBoardCommand);
        let first = service.board().selection()[0].clone();
        service.toggle_selection(ToggleCellCommand { filename: first });
        let board = service.board().clone();
        let catalog = service.catalog().clone();

        for path in ["/boards/dupes.json", "/malformed/board.json"] {
            let outcome = service.import_board(ImportBoardCommand::at(path));
            assert!(matches!(outcome, BoardOutcome::Failed(_)), "{path}");
            assert_eq!(service.board(), &board);
            assert_eq!(service.catalog(), &catalog);
        }
    }

    #[test]
    fn toggling_twice_restores_toggled_set() {
        let mut service = service(6);
        service.new_board(NewBoardCommand);
        let target = service.board().selection()[3].clone();
        let before = service.board().toggled().clone();

        service.toggle_selection(ToggleCellCommand {
            filename: target.clone(),
        });
        assert!(service.board().is_toggled(&target));
        service.toggle_selection(ToggleCellCommand { filename: target });
        assert_eq!(service.board().toggled(), &before);
    }

    #[test]
    fn export_asks_picker_with_default_name_and_json_filter() {
        let files = FakeFiles::default();
        let picker = FakePicker {
            answer: Some(PathBuf::from("/boards/mine.json")),
            ..FakePicker::default()
        };
        let mut service = service_with(Some(entries(30)), files.clone(), picker.clone(), 3);
        service.new_board(NewBoardCommand);

        let outcome = service.export_board(ExportBoardCommand::default());
        assert_eq!(
            outcome,
            BoardOutcome::Exported(PathBuf::from("/boards/mine.json"))
        );
        assert_eq!(
            picker.requests.borrow().as_slice(),
            [(Some(EXPORT_FILE_NAME.to_string()), JSON_FILTER)]
        );

        let stored = files.stored.borrow();
        let written = stored
            .get(Path::new("/boards/mine.json"))
            .expect("board written");
        let names: Vec<&str> = written.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, service.board().selection());
    }

    #[test]
    fn cancelled_export_writes_nothing() {
        let files = FakeFiles::default();
        let mut service = service_with(Some(entries(3)), files.clone(), FakePicker::default(), 3);
        service.new_board(NewBoardCommand);

        assert_eq!(
            service.export_board(ExportBoardCommand::default()),
            BoardOutcome::Cancelled
        );
        assert!(files.stored.borrow().is_empty());
    }

    #[test]
    fn failed_export_reports_failure_and_keeps_board() {
        let mut service = service(5);
        service.new_board(NewBoardCommand);
        let before = service.board().clone();

        let outcome = service.export_board(ExportBoardCommand::at("/readonly/board.json"));
        assert!(matches!(outcome, BoardOutcome::Failed(_)));
        assert_eq!(service.board(), &before);
    }

    #[test]
    fn export_then_import_restores_selection() {
        let files = FakeFiles::default();
        let mut service = service_with(Some(entries(30)), files.clone(), FakePicker::default(), 11);
        service.new_board(NewBoardCommand);
        let first = service.board().selection()[0].clone();
        service.toggle_selection(ToggleCellCommand { filename: first });
        let exported = selection_set(&service);

        service.export_board(ExportBoardCommand::at("/boards/round.json"));
        service.new_board(NewBoardCommand);

        let outcome = service.import_board(ImportBoardCommand::at("/boards/round.json"));
        assert_eq!(
            outcome,
            BoardOutcome::Imported(PathBuf::from("/boards/round.json"))
        );
        assert_eq!(selection_set(&service), exported);
        assert_eq!(service.catalog().len(), exported.len());
        assert!(service.board().toggled().is_empty());
        let featured = service.board().featured().expect("featured");
        assert!(exported.contains(featured));
    }

    #[test]
    fn import_keeps_file_order_and_has_no_size_cap() {
        let files = FakeFiles::default();
        files
            .stored
            .borrow_mut()
            .insert(PathBuf::from("/boards/big.json"), entries(30));
        let picker = FakePicker {
            answer: Some(PathBuf::from("/boards/big.json")),
            ..FakePicker::default()
        };
        let mut service = service_with(Some(entries(2)), files, picker.clone(), 5);

        service.import_board(ImportBoardCommand::default());
        let expected: Vec<String> = (0..30).map(|index| format!("{index}.png")).collect();
        assert_eq!(service.board().selection(), expected.as_slice());
        assert_eq!(picker.requests.borrow().as_slice(), [(None, JSON_FILTER)]);
    }

    #[test]
    fn importing_empty_board_clears_featured() {
        let files = FakeFiles::default();
        files
            .stored
            .borrow_mut()
            .insert(PathBuf::from("/boards/empty.json"), Vec::new());
        let mut service = service_with(Some(entries(4)), files, FakePicker::default(), 5);
        service.new_board(NewBoardCommand);

        service.import_board(ImportBoardCommand::at("/boards/empty.json"));
        assert!(service.board().selection().is_empty());
        assert_eq!(service.board().featured(), None);
    }

    #[test]
    fn failed_or_cancelled_import_keeps_state() {
        let mut service = service(8);
        service.new_board(NewBoardCommand);
        let board = service.board().clone();
        let catalog = service.catalog().clone();

        assert_eq!(
            service.import_board(ImportBoardCommand::default()),
            BoardOutcome::Cancelled
        );
        let outcome = service.import_board(ImportBoardCommand::at("/boards/missing.json"));
        assert!(matches!(outcome, BoardOutcome::Failed(_)));
        assert_eq!(service.board(), &board);
        assert_eq!(service.catalog(), &catalog);
    }
}
