//! Draft lifecycle
//!
//! Keeps the in-progress wizard input of one role in memory and mirrors it
//! to the durable store. The controller is a small timer-driven state
//! machine; callers pass the current [`Instant`] in, so it can be driven by
//! a real or a paused clock.
//!
//! ```text
//!   restore ──► Restoring ──(window over)──► Idle
//!                  │ edit                      │ edit
//!                  ▼                           ▼
//!                  Dirty (deadline = now + debounce, never inside the window)
//!                    │ edit: deadline restarts
//!                    ▼ deadline reached
//!               PendingWrite ──flush──► Idle
//! ```
//!
//! A flush of an emptied form removes the stored draft.

use serde::{Deserialize, Serialize};
use shared::models::{BasicInfoDraft, DetailsDraft, DraftData};
use shared::util::now_millis;
use std::fmt;
use std::str::FromStr;
use tokio::time::Instant;

use crate::config::WizardTiming;
use crate::store::DurableStore;
use crate::wizard::WizardStep;

/// Who is filling in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fills in basic info and details
    #[default]
    Admin,
    /// Fills in details only
    Ops,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Ops => "ops",
        }
    }

    /// Durable store key of this role's draft
    pub fn draft_key(&self) -> &'static str {
        match self {
            Self::Admin => "draft_admin",
            Self::Ops => "draft_ops",
        }
    }

    /// Step the wizard opens on
    pub fn first_step(&self) -> WizardStep {
        match self {
            Self::Admin => WizardStep::BasicInfo,
            Self::Ops => WizardStep::Details,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "ops" => Ok(Self::Ops),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Persistence state of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Just restored; nothing is written back before `until`
    Restoring { until: Instant },
    /// Memory and store agree (or there is nothing to write)
    Idle,
    /// Edited; written once `deadline` passes without further edits
    Dirty { deadline: Instant },
    /// Quiet period over, write due
    PendingWrite,
}

/// Draft controller for one role
#[derive(Debug)]
pub struct DraftController {
    store: DurableStore,
    role: Role,
    timing: WizardTiming,
    state: DraftState,
    data: DraftData,
    generation: u64,
    suppress_until: Option<Instant>,
}

impl DraftController {
    pub fn new(store: DurableStore, role: Role, timing: WizardTiming) -> Self {
        Self {
            store,
            role,
            timing,
            state: DraftState::Idle,
            data: DraftData::default(),
            generation: 0,
            suppress_until: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn data(&self) -> &DraftData {
        &self.data
    }

    /// Bumped on every reset; forms keyed on it start over
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load the stored draft (empty when missing or unreadable) and open
    /// the suppress window
    pub fn restore(&mut self, now: Instant) -> &DraftData {
        self.data = self.store.read(self.role.draft_key(), DraftData::default());
        let until = now + self.timing.suppress_window;
        self.state = DraftState::Restoring { until };
        self.suppress_until = Some(until);
        tracing::debug!(
            role = %self.role,
            has_basic_info = self.data.basic_info.is_some(),
            "Draft restored"
        );
        &self.data
    }

    /// Edit the basic info part (created empty on first edit)
    pub fn update_basic_info(&mut self, now: Instant, edit: impl FnOnce(&mut BasicInfoDraft)) {
        edit(self.data.basic_info.get_or_insert_with(BasicInfoDraft::default));
        self.mark_edited(now);
    }

    /// Replace the basic info part
    pub fn set_basic_info(&mut self, now: Instant, basic_info: Option<BasicInfoDraft>) {
        self.data.basic_info = basic_info;
        self.mark_edited(now);
    }

    pub fn update_details(&mut self, now: Instant, edit: impl FnOnce(&mut DetailsDraft)) {
        edit(&mut self.data.details);
        self.mark_edited(now);
    }

    fn mark_edited(&mut self, now: Instant) {
        let mut deadline = now + self.timing.debounce;
        if let Some(until) = self.suppress_until {
            if deadline < until {
                tracing::trace!(role = %self.role, "Edit inside suppress window, write held until it closes");
                deadline = until;
            }
        }
        self.state = DraftState::Dirty { deadline };
    }

    /// Advance timer-driven transitions
    pub fn tick(&mut self, now: Instant) {
        self.state = match self.state {
            DraftState::Restoring { until } if now >= until => DraftState::Idle,
            DraftState::Dirty { deadline } if now >= deadline => DraftState::PendingWrite,
            other => other,
        };
    }

    /// Perform a due write. Returns what was written.
    pub fn flush(&mut self) -> Option<DraftData> {
        if self.state != DraftState::PendingWrite {
            return None;
        }
        self.state = DraftState::Idle;
        self.write()
    }

    /// Write now if anything is waiting, ignoring the debounce.
    pub fn flush_now(&mut self) -> Option<DraftData> {
        match self.state {
            DraftState::Dirty { .. } | DraftState::PendingWrite => {
                self.state = DraftState::Idle;
                self.write()
            }
            _ => None,
        }
    }

    /// `tick` then `flush`
    pub fn poll(&mut self, now: Instant) -> Option<DraftData> {
        self.tick(now);
        self.flush()
    }

    /// When the next timer transition happens, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            DraftState::Restoring { until } => Some(until),
            DraftState::Dirty { deadline } => Some(deadline),
            DraftState::Idle | DraftState::PendingWrite => None,
        }
    }

    fn write(&mut self) -> Option<DraftData> {
        if self.data.is_empty() {
            self.store.remove(self.role.draft_key());
            tracing::debug!(role = %self.role, "Draft emptied, removed");
            return None;
        }
        self.data.timestamp = Some(now_millis());
        self.store.write(self.role.draft_key(), &self.data);
        tracing::debug!(role = %self.role, "Draft saved");
        Some(self.data.clone())
    }

    /// Delete the stored draft and start over with an empty form
    pub fn clear(&mut self) {
        self.store.remove(self.role.draft_key());
        self.data = DraftData::default();
        self.state = DraftState::Idle;
        self.generation += 1;
        tracing::debug!(role = %self.role, "Draft cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::EmploymentType;
    use std::time::Duration;

    fn t0() -> Instant {
        Instant::from_std(std::time::Instant::now())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(store: &DurableStore, role: Role) -> DraftController {
        DraftController::new(store.clone(), role, WizardTiming::default())
    }

    #[test]
    fn test_role_keys_and_first_steps() {
        assert_eq!(Role::Admin.draft_key(), "draft_admin");
        assert_eq!(Role::Ops.draft_key(), "draft_ops");
        assert_eq!(Role::Admin.first_step(), WizardStep::BasicInfo);
        assert_eq!(Role::Ops.first_step(), WizardStep::Details);
        assert_eq!("ops".parse::<Role>().unwrap(), Role::Ops);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_restore_missing_draft_is_empty() {
        let store = DurableStore::in_memory().unwrap();
        let mut draft = controller(&store, Role::Admin);
        let now = t0();
        assert!(draft.restore(now).is_empty());
        assert_eq!(
            draft.state(),
            DraftState::Restoring {
                until: now + ms(600)
            }
        );
    }

    #[test]
    fn test_restore_corrupt_draft_is_empty() {
        let store = DurableStore::in_memory().unwrap();
        store.put_raw("draft_ops", b"\x00garbage").unwrap();
        let mut draft = controller(&store, Role::Ops);
        assert!(draft.restore(t0()).is_empty());
    }

    #[test]
    fn test_edit_inside_suppress_window_written_after_it_closes() {
        let store = DurableStore::in_memory().unwrap();
        let mut draft = controller(&store, Role::Ops);
        let now = t0();
        draft.restore(now);

        draft.update_details(now + ms(50), |d| d.office_location = "Depok".into());
        // debounce alone would fire at 550ms, still inside the window
        assert_eq!(draft.next_deadline(), Some(now + ms(600)));
        assert!(draft.poll(now + ms(550)).is_none());
        assert!(store.read_opt::<DraftData>("draft_ops").is_none());

        let written = draft.poll(now + ms(600)).unwrap();
        assert_eq!(written.details.office_location, "Depok");
    }

    #[test]
    fn test_late_window_edit_keeps_full_debounce() {
        let store = DurableStore::in_memory().unwrap();
        let mut draft = controller(&store, Role::Ops);
        let now = t0();
        draft.restore(now);

        draft.update_details(now + ms(400), |d| d.office_location = "Depok".into());
        assert!(draft.poll(now + ms(800)).is_none());

        let written = draft.poll(now + ms(900)).unwrap();
        assert_eq!(written.details.office_location, "Depok");
        let stored: DraftData = store.read_opt("draft_ops").unwrap();
        assert_eq!(stored.details.office_location, "Depok");
    }

    #[test]
    fn test_emptied_form_replaces_stored_draft() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();
        let mut draft = controller(&store, Role::Ops);

        draft.update_details(now, |d| d.notes = "hello".into());
        assert!(draft.poll(now + ms(500)).is_some());

        draft.update_details(now + ms(600), |d| d.notes.clear());
        assert!(draft.poll(now + ms(1600)).is_none());
        assert!(store.read_opt::<DraftData>("draft_ops").is_none());

        let mut reader = controller(&store, Role::Ops);
        assert!(reader.restore(now + ms(2000)).is_empty());
    }

    #[test]
    fn test_each_settled_change_overwrites_stored_draft() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0() + ms(1000);
        let mut draft = controller(&store, Role::Ops);

        for (i, location) in ["Jakarta", "Depok", "Surabaya"].into_iter().enumerate() {
            let at = now + ms(1000 * i as u64);
            draft.update_details(at, |d| d.office_location = location.into());
            assert!(draft.poll(at + ms(500)).is_some());

            let stored: DraftData = store.read_opt("draft_ops").unwrap();
            assert_eq!(stored.details.office_location, location);
        }
    }

    #[test]
    fn test_rapid_edits_coalesce_into_one_write() {
        let store = DurableStore::in_memory().unwrap();
        let mut draft = controller(&store, Role::Ops);
        let start = t0();
        draft.restore(start);
        let now = start + ms(700);

        draft.update_details(now, |d| d.office_location = "Dep".into());
        draft.update_details(now + ms(300), |d| d.office_location = "Depok".into());

        // 500ms after the first edit, but only 200ms after the second
        assert!(draft.poll(now + ms(500)).is_none());
        assert!(store.read_opt::<DraftData>("draft_ops").is_none());

        let written = draft.poll(now + ms(800)).unwrap();
        assert_eq!(written.details.office_location, "Depok");
        assert!(written.timestamp.is_some());
        assert_eq!(draft.state(), DraftState::Idle);

        let stored: DraftData = store.read_opt("draft_ops").unwrap();
        assert_eq!(stored.details.office_location, "Depok");

        // nothing further due
        assert!(draft.poll(now + ms(5000)).is_none());
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0() + ms(1000);

        let mut writer = controller(&store, Role::Admin);
        writer.update_basic_info(now, |b| {
            b.full_name = "Jane Roe".into();
            b.department = "Engineering".into();
        });
        writer.update_details(now, |d| d.employment_type = Some(EmploymentType::Intern));
        let written = writer.poll(now + ms(500)).unwrap();

        let mut reader = controller(&store, Role::Admin);
        let restored = reader.restore(now + ms(600)).clone();
        assert!(restored.same_content(&written));
        assert_eq!(restored.basic_info.unwrap().full_name, "Jane Roe");
    }

    #[test]
    fn test_roles_have_independent_slots() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();

        let mut admin = controller(&store, Role::Admin);
        admin.update_details(now, |d| d.notes = "admin notes".into());
        admin.poll(now + ms(500));

        let mut ops = controller(&store, Role::Ops);
        assert!(ops.restore(now + ms(600)).is_empty());
    }

    #[test]
    fn test_empty_draft_is_not_written() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();
        let mut draft = controller(&store, Role::Ops);
        draft.update_details(now, |d| d.notes.clear());
        assert!(draft.poll(now + ms(500)).is_none());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_clear_removes_draft_and_bumps_generation() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();
        let mut draft = controller(&store, Role::Ops);
        draft.update_details(now, |d| d.photo = "data:image/png;base64,AA==".into());
        draft.poll(now + ms(500));
        assert!(store.read_opt::<DraftData>("draft_ops").is_some());

        draft.update_details(now + ms(600), |d| d.notes = "unsaved".into());
        draft.clear();

        assert!(store.read_opt::<DraftData>("draft_ops").is_none());
        assert!(draft.data().is_empty());
        assert_eq!(draft.generation(), 1);
        assert_eq!(draft.state(), DraftState::Idle);
        // the cancelled debounce does not resurrect it
        assert!(draft.poll(now + ms(5000)).is_none());
    }

    #[test]
    fn test_flush_now_skips_debounce() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();
        let mut draft = controller(&store, Role::Admin);
        draft.update_details(now, |d| d.notes = "n".into());
        assert!(draft.flush().is_none());
        assert!(draft.flush_now().is_some());
        assert_eq!(draft.state(), DraftState::Idle);
    }

    #[test]
    fn test_next_deadline() {
        let store = DurableStore::in_memory().unwrap();
        let now = t0();
        let mut draft = controller(&store, Role::Admin);
        assert_eq!(draft.next_deadline(), None);

        draft.restore(now);
        assert_eq!(draft.next_deadline(), Some(now + ms(600)));

        draft.update_details(now + ms(700), |d| d.notes = "x".into());
        assert_eq!(draft.next_deadline(), Some(now + ms(1200)));
    }
}
