use super::sequence::Sequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Program {
    Blastn,
    Blastp,
    Blastx,
    Tblastn,
    Tblastx,
}

/// Option set handed to the engine when the query context is prepared.
/// Unset fields keep whatever defaults the engine derives from the program.
#[derive(Clone, Debug)]
pub struct BlastOptions {
    pub program: Program,
    pub evalue_threshold: Option<f64>,
    pub db_length: Option<u64>,
    pub match_reward: Option<i32>,
    pub dust_filtering_level: Option<i32>,
    pub dust_filtering_window: Option<i32>,
    pub dust_filtering_linker: Option<i32>,
    pub repeat_filtering_db: Option<String>,
}

impl Default for BlastOptions {
    fn default() -> Self {
        Self {
            program: Program::Blastn,
            evalue_threshold: None,
            db_length: None,
            match_reward: None,
            dust_filtering_level: None,
            dust_filtering_window: None,
            dust_filtering_linker: None,
            repeat_filtering_db: None,
        }
    }
}

/// The external computation. Implementations own alignment, scoring and
/// statistics; this crate only routes sequences in and reports out.
pub trait AlignmentEngine {
    type Report;

    /// Bind the fixed query context and option set. Called exactly once,
    /// before the first `align`.
    fn prepare(&mut self, query: &Sequence, options: &BlastOptions);

    /// Run the prepared engine against one subject, synchronously.
    fn align(&mut self, subject: &Sequence) -> Self::Report;
}

/// One engine invocation paired with the subject it ran on.
#[derive(Debug)]
pub struct BlastOutcome<R> {
    pub subject: Sequence,
    pub report: R,
}

/// Holds a prepared engine and runs it subject by subject.
pub struct Blaster<E: AlignmentEngine> {
    engine: E,
    options: BlastOptions,
}

impl<E: AlignmentEngine> Blaster<E> {
    pub fn new(mut engine: E, query: &Sequence, options: BlastOptions) -> Self {
        engine.prepare(query, &options);
        Self { engine, options }
    }

    pub fn options(&self) -> &BlastOptions {
        &self.options
    }

    pub fn blast(&mut self, subject: Sequence) -> BlastOutcome<E::Report> {
        let report = self.engine.align(&subject);
        BlastOutcome { subject, report }
    }
}
