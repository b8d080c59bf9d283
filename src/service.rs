// File: src/service.rs
use crate::core::types::{BoardList, Card, Checklist, ChecklistItem};
use crate::error::ShoprResult;

/// The checklist service the engine reads boards from and writes results to.
///
/// Implementations own all I/O and surface their own failures.
pub trait ChecklistService {
    /// Every card on the board, in board order.
    fn board_cards(&self) -> ShoprResult<Vec<Card>>;

    fn board_lists(&self) -> ShoprResult<Vec<BoardList>>;

    fn card(&self, card_id: &str) -> ShoprResult<Card>;

    fn list_cards(&self, list_id: &str) -> ShoprResult<Vec<Card>>;

    fn checklist(&self, checklist_id: &str) -> ShoprResult<Checklist>;

    /// Replaces the stored item that has `item.id` with `item`.
    fn update_checklist_item(&mut self, checklist_id: &str, item: &ChecklistItem) -> ShoprResult<()>;

    /// Appends an unchecked item and returns its id.
    fn add_checklist_item(&mut self, checklist_id: &str, name: &str) -> ShoprResult<String>;

    /// Creates an empty checklist on a card and returns its id.
    fn create_checklist(&mut self, card_id: &str, name: &str) -> ShoprResult<String>;

    fn move_card_to_list(&mut self, card_id: &str, list_id: &str) -> ShoprResult<()>;

    fn remove_label(&mut self, card_id: &str, label_id: &str) -> ShoprResult<()>;
}
