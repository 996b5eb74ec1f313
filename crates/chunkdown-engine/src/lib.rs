/*!
 * # chunkdown-engine
 *
 * An incremental, streaming segmenter for Markdown-like text. It partitions a
 * UTF-16 code-unit stream into typed, non-overlapping spans while the text is
 * still arriving chunk by chunk, the workload shape of a language model
 * emitting tokens into a renderer.
 *
 * ## Architecture
 *
 * - **[`plugin`]**: the recognizer contract. Every construct is a small state
 *   machine advancing through `Idle → Trying → Processing (→ WaitFor) → Idle`
 *   and returning a per-code-unit *keep decision* (delimiter stripping).
 * - **[`plugins`]**: the per-construct recognizers, one module per construct
 *   family, each owning its own delimiter knowledge.
 * - **[`kmp`]**: a streaming single-pattern matcher used by the recognizers
 *   that have to detect dynamically built closing tags (`</name>`).
 * - **[`session`]**: the engine. While no recognizer has committed it runs the
 *   whole roster speculatively in parallel, buffers the contested prefix,
 *   commits to the first (lowest-indexed) recognizer to reach `Processing`,
 *   and replays the buffered keep decisions under the winner's tag. Roster
 *   order is grammar precedence.
 * - **[`segment`]**: the output model: `(kind, start, end)` spans over global
 *   UTF-16 code-unit indices, with an explicit break marker between groups,
 *   and the flat `i32` wire layout consumed by foreign hosts.
 * - **[`xml_split`]**: a stateless whole-document splitter that runs only the
 *   XML recognizer and yields default/XML regions.
 *
 * Malformed input never fails: constructs that do not confirm degrade to
 * plain text, and constructs left dangling at the end of a chunk are carried
 * into the next push.
 *
 * ## Usage
 *
 * ```rust
 * use chunkdown_engine::{SegmentKind, StreamSession};
 *
 * let mut session = StreamSession::inline();
 * let segments = session.push_str("some **bold** text");
 * assert!(segments.iter().any(|s| s.kind == SegmentKind::Bold));
 * ```
 */

pub mod kmp;
pub mod plugin;
pub mod plugins;
pub mod segment;
pub mod session;
pub mod xml_split;

mod emit;

pub use segment::{segments_to_wire, Segment, SegmentKind};
pub use session::StreamSession;
pub use xml_split::{split_by_xml, split_spans_to_wire, SplitKind, SplitSpan};
