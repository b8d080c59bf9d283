// File: src/board.rs
use crate::core::types::{BoardList, Card, Checklist, ChecklistItem};
use crate::error::{ShoprError, ShoprResult};
use crate::service::ChecklistService;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A board exported from the checklist service: its lists, cards and the
/// checklists those cards reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub lists: Vec<BoardList>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    /// Counter for ids handed out to created checklists and items.
    #[serde(default, rename = "nextId")]
    pub next_id: u64,
}

/// A [`ChecklistService`] backed by a JSON board snapshot.
///
/// Changes stay in memory until [`BoardFile::save`].
pub struct BoardFile {
    board: Board,
    path: Option<PathBuf>,
}

impl BoardFile {
    pub fn open(path: &Path) -> ShoprResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let board: Board = serde_json::from_reader(reader)?;
        debug!(path = %path.display(), cards = board.cards.len(), "board loaded");
        Ok(Self {
            board,
            path: Some(path.to_path_buf()),
        })
    }

    /// A board that is never written anywhere.
    pub fn in_memory(board: Board) -> Self {
        Self { board, path: None }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn save(&self) -> ShoprResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &self.board)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.board.next_id += 1;
        format!("{prefix}-{}", self.board.next_id)
    }

    fn card_mut(&mut self, card_id: &str) -> ShoprResult<&mut Card> {
        self.board
            .cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| ShoprError::UnknownCard { id: card_id.to_string() })
    }

    fn checklist_mut(&mut self, checklist_id: &str) -> ShoprResult<&mut Checklist> {
        self.board
            .checklists
            .iter_mut()
            .find(|checklist| checklist.id == checklist_id)
            .ok_or_else(|| ShoprError::UnknownChecklist {
                id: checklist_id.to_string(),
            })
    }
}

impl ChecklistService for BoardFile {
    fn board_cards(&self) -> ShoprResult<Vec<Card>> {
        Ok(self.board.cards.clone())
    }

    fn board_lists(&self) -> ShoprResult<Vec<BoardList>> {
        Ok(self.board.lists.clone())
    }

    fn card(&self, card_id: &str) -> ShoprResult<Card> {
        self.board
            .cards
            .iter()
            .find(|card| card.id == card_id)
            .cloned()
            .ok_or_else(|| ShoprError::UnknownCard { id: card_id.to_string() })
    }

    fn list_cards(&self, list_id: &str) -> ShoprResult<Vec<Card>> {
        if !self.board.lists.iter().any(|list| list.id == list_id) {
            return Err(ShoprError::UnknownList { id: list_id.to_string() });
        }
        Ok(self
            .board
            .cards
            .iter()
            .filter(|card| card.list_id == list_id)
            .cloned()
            .collect())
    }

    fn checklist(&self, checklist_id: &str) -> ShoprResult<Checklist> {
        self.board
            .checklists
            .iter()
            .find(|checklist| checklist.id == checklist_id)
            .cloned()
            .ok_or_else(|| ShoprError::UnknownChecklist {
                id: checklist_id.to_string(),
            })
    }

    fn update_checklist_item(&mut self, checklist_id: &str, item: &ChecklistItem) -> ShoprResult<()> {
        let checklist = self.checklist_mut(checklist_id)?;
        let slot = checklist
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| ShoprError::UnknownItem {
                checklist_id: checklist_id.to_string(),
                item_id: item.id.clone(),
            })?;
        *slot = item.clone();
        Ok(())
    }

    fn add_checklist_item(&mut self, checklist_id: &str, name: &str) -> ShoprResult<String> {
        // Fail before burning an id.
        self.checklist_mut(checklist_id)?;
        let id = self.fresh_id("item");
        let checklist = self.checklist_mut(checklist_id)?;
        let position = checklist.items.iter().map(|item| item.position).max().map_or(0, |max| max + 1);
        checklist.items.push(ChecklistItem::new(id.clone(), name, position));
        Ok(id)
    }

    fn create_checklist(&mut self, card_id: &str, name: &str) -> ShoprResult<String> {
        self.card_mut(card_id)?;
        let id = self.fresh_id("checklist");
        self.card_mut(card_id)?.checklist_ids.push(id.clone());
        self.board.checklists.push(Checklist {
            id: id.clone(),
            card_id: card_id.to_string(),
            name: name.to_string(),
            items: Vec::new(),
        });
        Ok(id)
    }

    fn move_card_to_list(&mut self, card_id: &str, list_id: &str) -> ShoprResult<()> {
        if !self.board.lists.iter().any(|list| list.id == list_id) {
            return Err(ShoprError::UnknownList { id: list_id.to_string() });
        }
        self.card_mut(card_id)?.list_id = list_id.to_string();
        Ok(())
    }

    fn remove_label(&mut self, card_id: &str, label_id: &str) -> ShoprResult<()> {
        self.card_mut(card_id)?.labels.retain(|label| label.id != label_id);
        Ok(())
    }
}
