use crate::config::Prefs;
use crate::core::merger::{merge, MergeAction};
use crate::core::orderer::propose;
use crate::core::scores::ScoreTable;
use crate::core::types::{Checklist, ItemState};
use crate::error::ShoprResult;
use crate::learning::LearningEngine;
use crate::persistence::{load_scores, save_scores};
use crate::service::ChecklistService;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counts of what a run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub trained_checklists: usize,
    pub ordered_cards: usize,
    pub moved_items: usize,
    pub tagged_items: usize,
    pub populated_cards: usize,
    pub created_items: usize,
    pub renamed_items: usize,
    pub recycled_recipes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOutcome {
    pub cards: usize,
    pub moved_items: usize,
    pub tagged_items: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateOutcome {
    pub cards: usize,
    pub created_items: usize,
    pub renamed_items: usize,
    pub recycled_recipes: usize,
}

/// Owns the score table for one run and sequences the checklist service
/// around training, ordering and populating.
pub struct ShoprEngine {
    scores: ScoreTable,
    learning_engine: LearningEngine,
    scores_path: Option<PathBuf>,
}

impl ShoprEngine {
    pub fn new(scores: ScoreTable, k_factor: f64) -> Self {
        Self {
            scores,
            learning_engine: LearningEngine::with_k_factor(k_factor),
            scores_path: None,
        }
    }

    /// Loads the table at `path`, starting empty if the file does not exist.
    ///
    /// A file that exists but cannot be read or decoded is an error, so a
    /// later save never replaces ratings that were only unreadable.
    pub fn from_file_or_new(path: &Path, k_factor: f64) -> ShoprResult<Self> {
        let scores = load_scores(path)?;
        debug!(path = %path.display(), keys = scores.len(), "scores loaded");
        let mut engine = Self::new(scores, k_factor);
        engine.scores_path = Some(path.to_path_buf());
        Ok(engine)
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn save_scores(&self) -> ShoprResult<()> {
        if let Some(path) = &self.scores_path {
            save_scores(&self.scores, path)?;
            info!(path = %path.display(), keys = self.scores.len(), "scores saved");
        }
        Ok(())
    }

    /// Checklists of every card carrying `label`, card by card.
    pub fn labelled_checklists(&self, service: &impl ChecklistService, label: &str) -> ShoprResult<Vec<Checklist>> {
        let mut checklists = Vec::new();
        for card in service.board_cards()? {
            if !card.has_label(label) {
                continue;
            }
            for checklist_id in &card.checklist_ids {
                checklists.push(service.checklist(checklist_id)?);
            }
        }
        Ok(checklists)
    }

    pub fn train(&mut self, checklists: &[Checklist]) {
        self.learning_engine.train_all(&mut self.scores, checklists);
    }

    /// Removes every label called `label_name` from the given cards.
    pub fn reset_label(
        &self,
        service: &mut impl ChecklistService,
        label_name: &str,
        card_ids: &[String],
    ) -> ShoprResult<()> {
        for card_id in card_ids {
            let card = service.card(card_id)?;
            for label in card.labels.iter().filter(|label| label.name == label_name) {
                service.remove_label(&card.id, &label.id)?;
            }
        }
        Ok(())
    }

    /// Moves the items of every card carrying the order label to their
    /// learned positions, tagging the ones whose exact name was never trained.
    pub fn order_cards(&self, service: &mut impl ChecklistService, prefs: &Prefs) -> ShoprResult<OrderOutcome> {
        let mut outcome = OrderOutcome::default();
        for card in service.board_cards()? {
            if !card.has_label(&prefs.order_label) {
                continue;
            }
            info!(card = %card.name, "ordering");

            for checklist_id in &card.checklist_ids {
                let checklist = service.checklist(checklist_id)?;
                for item in &checklist.items {
                    let Some(update) = propose(&self.scores, item) else {
                        continue;
                    };
                    debug!(item = %item.name, from = item.position, to = update.position, "moving item");
                    if update.name != item.name {
                        outcome.tagged_items += 1;
                    }
                    let mut changed = item.clone();
                    changed.name = update.name;
                    changed.position = update.position;
                    service.update_checklist_item(checklist_id, &changed)?;
                    outcome.moved_items += 1;
                }
            }

            info!(card = %card.name, "ordering done");
            self.reset_label(service, &prefs.order_label, &[card.id.clone()])?;
            outcome.cards += 1;
        }
        Ok(outcome)
    }

    /// Fills the checklist of every card carrying the populate label from
    /// the recipes in the selected list, then sends those recipes back to the
    /// available list with their checkmarks cleared.
    pub fn populate(&self, service: &mut impl ChecklistService, prefs: &Prefs) -> ShoprResult<PopulateOutcome> {
        let mut outcome = PopulateOutcome::default();
        for card in service.board_cards()? {
            if !card.has_label(&prefs.populate_label) {
                continue;
            }
            info!(card = %card.name, "populating shopping list");

            let recipes = service.list_cards(&prefs.selected_list)?;
            info!(count = recipes.len(), "selected recipes");

            let target_id = match card.checklist_ids.first() {
                Some(id) => id.clone(),
                None => {
                    info!(card = %card.name, "creating checklist");
                    service.create_checklist(&card.id, &prefs.shopping_list_name)?
                }
            };
            let target = service.checklist(&target_id)?;

            let mut sources = Vec::new();
            for recipe in &recipes {
                info!(recipe = %recipe.name, "processing recipe");
                for checklist_id in &recipe.checklist_ids {
                    sources.push(service.checklist(checklist_id)?);
                }
            }

            for action in merge(&target.items, &sources) {
                match action {
                    MergeAction::SetName { item_id, name } => {
                        let Some(existing) = target.items.iter().find(|item| item.id == item_id) else {
                            continue;
                        };
                        let mut renamed = existing.clone();
                        debug!(from = %renamed.name, to = %name, "updating quantity");
                        renamed.name = name;
                        service.update_checklist_item(&target_id, &renamed)?;
                        outcome.renamed_items += 1;
                    }
                    MergeAction::Create { name } => {
                        debug!(item = %name, "adding item");
                        service.add_checklist_item(&target_id, &name)?;
                        outcome.created_items += 1;
                    }
                }
            }

            for source in &sources {
                for item in source.items.iter().filter(|item| item.is_complete()) {
                    let mut reset = item.clone();
                    reset.state = ItemState::Incomplete;
                    service.update_checklist_item(&source.id, &reset)?;
                    debug!(item = %item.name, "reset checkmark");
                }
            }
            for recipe in &recipes {
                service.move_card_to_list(&recipe.id, &prefs.available_list)?;
                info!(recipe = %recipe.name, "moved recipe back to available list");
                outcome.recycled_recipes += 1;
            }

            self.reset_label(service, &prefs.populate_label, &[card.id.clone()])?;
            info!(card = %card.name, "populating done");
            outcome.cards += 1;
        }
        Ok(outcome)
    }

    /// Train, persist, order, populate.
    pub fn run(&mut self, service: &mut impl ChecklistService, prefs: &Prefs) -> ShoprResult<RunSummary> {
        let checklists = self.labelled_checklists(&*service, &prefs.train_label)?;
        self.train(&checklists);
        self.save_scores()?;

        let mut trained_cards: Vec<String> = checklists.iter().map(|c| c.card_id.clone()).collect();
        trained_cards.dedup();
        self.reset_label(service, &prefs.train_label, &trained_cards)?;

        let ordered = self.order_cards(service, prefs)?;
        let populated = self.populate(service, prefs)?;

        Ok(RunSummary {
            trained_checklists: checklists.len(),
            ordered_cards: ordered.cards,
            moved_items: ordered.moved_items,
            tagged_items: ordered.tagged_items,
            populated_cards: populated.cards,
            created_items: populated.created_items,
            renamed_items: populated.renamed_items,
            recycled_recipes: populated.recycled_recipes,
        })
    }
}
