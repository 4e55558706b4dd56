use tracing::{debug, warn};
use zagi_agent::{Agent, Session};
use zagi_git::notes::{AGENT_NOTES_REF, PROMPT_NOTES_REF, SESSION_NOTES_REF};
use zagi_git::{GitError, NoteStore, Oid};

/// The three kinds of provenance attached to a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Agent,
    Prompt,
    Session,
}

impl NoteKind {
    pub fn notes_ref(&self) -> &'static str {
        match self {
            NoteKind::Agent => AGENT_NOTES_REF,
            NoteKind::Prompt => PROMPT_NOTES_REF,
            NoteKind::Session => SESSION_NOTES_REF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceNote {
    pub commit_id: Oid,
    pub kind: NoteKind,
    pub payload: String,
}

/// Where provenance notes end up
pub trait NoteSink {
    fn write_note(&self, notes_ref: &str, commit: Oid, payload: &str) -> Result<(), GitError>;
}

impl NoteSink for NoteStore<'_> {
    fn write_note(&self, notes_ref: &str, commit: Oid, payload: &str) -> Result<(), GitError> {
        self.write(notes_ref, commit, payload).map(|_| ())
    }
}

/// Which notes were actually written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordReport {
    pub agent: bool,
    pub prompt: bool,
    pub session: bool,
}

pub struct ProvenanceRecorder<'a> {
    sink: &'a dyn NoteSink,
}

impl<'a> ProvenanceRecorder<'a> {
    pub fn new(sink: &'a dyn NoteSink) -> Self {
        Self { sink }
    }

    /// Build the notes for one commit. The session note only exists when a
    /// transcript was found.
    pub fn notes(
        commit_id: Oid,
        prompt: &str,
        agent: Agent,
        session: Option<&Session>,
    ) -> Vec<ProvenanceNote> {
        let mut notes = vec![
            ProvenanceNote {
                commit_id,
                kind: NoteKind::Agent,
                payload: agent.to_string(),
            },
            ProvenanceNote {
                commit_id,
                kind: NoteKind::Prompt,
                payload: prompt.to_string(),
            },
        ];
        if let Some(session) = session {
            notes.push(ProvenanceNote {
                commit_id,
                kind: NoteKind::Session,
                payload: session.transcript.clone(),
            });
        }
        notes
    }

    /// Write every note independently. Failures are logged and reported,
    /// never returned.
    pub fn record(
        &self,
        commit_id: Oid,
        prompt: &str,
        agent: Agent,
        session: Option<&Session>,
    ) -> RecordReport {
        let mut report = RecordReport::default();

        for note in Self::notes(commit_id, prompt, agent, session) {
            let written = match self
                .sink
                .write_note(note.kind.notes_ref(), note.commit_id, &note.payload)
            {
                Ok(()) => true,
                Err(e) => {
                    warn!(notes_ref = note.kind.notes_ref(), error = %e, "Failed to record provenance");
                    false
                }
            };

            match note.kind {
                NoteKind::Agent => report.agent = written,
                NoteKind::Prompt => report.prompt = written,
                NoteKind::Session => report.session = written,
            }
        }

        debug!(?report, commit = %commit_id, "Recorded provenance");
        report
    }
}
