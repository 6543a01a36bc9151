/// Trait for a type that can output information about the wrapper's progress
pub trait MmcaiOutput {
	/// Base function for a simple message. Used as a fallback
	fn display_text(&mut self, text: String, level: MessageLevel);

	/// Function to display a message to the user
	fn display_message(&mut self, message: Message) {
		self.display_text(message.contents.default_format(), message.level);
	}

	/// Convenience function to remove the need to construct a message
	fn display(&mut self, contents: MessageContents, level: MessageLevel) {
		self.display_message(Message { contents, level })
	}

	/// Start a process of multiple messages. Implementations can use this to replace a line
	/// multiple times
	fn start_process(&mut self) {}

	/// End an existing process
	fn end_process(&mut self) {}

	/// Start a new section / level of hierarchy. Implementations can use this to set the indent level
	fn start_section(&mut self) {}

	/// End the current section and go down a level of hierarchy
	fn end_section(&mut self) {}

	// Specialized implementations for certain combinations of messages.
	// These all have default impls which you can override for more specific behavior

	/// Specialized implementation for announcing a successful login
	fn display_special_login(&mut self, player_name: &str, server: &str) {
		default_special_login(self, player_name, server);
	}
}

/// Displays the default login success messages
pub fn default_special_login(o: &mut (impl MmcaiOutput + ?Sized), player_name: &str, server: &str) {
	o.display(
		MessageContents::Success(format!("Successfully authenticated as {player_name}")),
		MessageLevel::Important,
	);
	o.display(
		MessageContents::Property(
			"Authentication server".into(),
			Box::new(MessageContents::Hyperlink(server.into())),
		),
		MessageLevel::Extra,
	);
}

/// A message supplied to the output
#[derive(Clone, Debug)]
pub struct Message {
	/// The contents of the message
	pub contents: MessageContents,
	/// The printing level of the message
	pub level: MessageLevel,
}

/// Contents of a message. Different types represent different formatting
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum MessageContents {
	/// Simple message with no formatting
	Simple(String),
	/// A warning to the user
	Warning(String),
	/// An error
	Error(String),
	/// A success / finish message
	Success(String),
	/// A key-value property
	Property(String, Box<MessageContents>),
	/// A header / big message
	Header(String),
	/// An start of some long running process. Usually ends with ...
	StartProcess(String),
	/// A hyperlink
	Hyperlink(String),
	/// An item in an unordered list
	ListItem(Box<MessageContents>),
}

impl MessageContents {
	/// Message formatting for the default implementation
	pub fn default_format(self) -> String {
		match self {
			MessageContents::Simple(text)
			| MessageContents::Success(text)
			| MessageContents::Hyperlink(text) => text,
			MessageContents::Warning(text) => format!("Warning: {text}"),
			MessageContents::Error(text) => format!("Error: {text}"),
			MessageContents::Property(key, value) => {
				format!("{key}: {}", value.default_format())
			}
			MessageContents::Header(text) => text.to_uppercase(),
			MessageContents::StartProcess(text) => format!("{text}..."),
			MessageContents::ListItem(item) => format!(" - {}", item.default_format()),
		}
	}
}

/// The level of logging that a message has
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageLevel {
	/// Messages that should always be displayed
	Important,
	/// Messages that can be displayed but are not required
	Extra,
	/// Debug-level messages. Good for logging but should not be displayed to
	/// the user unless they ask
	Debug,
	/// Very Debug-level messages. Should only be used for logging
	Trace,
}

impl MessageLevel {
	/// Checks if this level is at least another level
	pub fn at_least(&self, other: &Self) -> bool {
		match &self {
			Self::Important => matches!(
				other,
				Self::Important | Self::Extra | Self::Debug | Self::Trace
			),
			Self::Extra => matches!(other, Self::Extra | Self::Debug | Self::Trace),
			Self::Debug => matches!(other, Self::Debug | Self::Trace),
			Self::Trace => matches!(other, Self::Trace),
		}
	}
}

/// Dummy MmcaiOutput that doesn't print anything
pub struct NoOp;

impl MmcaiOutput for NoOp {
	fn display_text(&mut self, _text: String, _level: MessageLevel) {}
}

/// MmcaiOutput that records every formatted message. Useful for inspecting output in tests
#[derive(Default, Debug)]
pub struct Recorded {
	/// The messages that have been displayed, in order
	pub messages: Vec<(String, MessageLevel)>,
}

impl MmcaiOutput for Recorded {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		self.messages.push((text, level));
	}
}

impl Recorded {
	/// Checks whether any recorded message contains the given text
	pub fn contains(&self, text: &str) -> bool {
		self.messages.iter().any(|(msg, _)| msg.contains(text))
	}
}

/// RAII struct that opens and closes an output process
pub struct OutputProcess<'a, O: MmcaiOutput>(pub &'a mut O);

impl<'a, O> OutputProcess<'a, O>
where
	O: MmcaiOutput,
{
	/// Create a new OutputProcess from an MmcaiOutput
	pub fn new(o: &'a mut O) -> Self {
		o.start_process();
		Self(o)
	}
}

impl<'a, O> Drop for OutputProcess<'a, O>
where
	O: MmcaiOutput,
{
	fn drop(&mut self) {
		self.0.end_process();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_level_is_at_least() {
		assert!(MessageLevel::Extra.at_least(&MessageLevel::Debug));
		assert!(MessageLevel::Debug.at_least(&MessageLevel::Debug));
		assert!(!MessageLevel::Debug.at_least(&MessageLevel::Extra));
		assert!(MessageLevel::Important.at_least(&MessageLevel::Trace));
	}

	#[test]
	fn test_default_format() {
		let prop = MessageContents::Property(
			"Java".into(),
			Box::new(MessageContents::Simple("/usr/bin/java".into())),
		);
		assert_eq!(prop.default_format(), "Java: /usr/bin/java");
		assert_eq!(
			MessageContents::ListItem(Box::new(MessageContents::Warning("foo".into())))
				.default_format(),
			" - Warning: foo"
		);
		assert_eq!(
			MessageContents::StartProcess("Logging in".into()).default_format(),
			"Logging in..."
		);
	}

	#[test]
	fn test_special_login() {
		let mut o = Recorded::default();
		o.display_special_login("Steve", "http://localhost/api");
		assert_eq!(o.messages.len(), 2);
		assert!(o.contains("Successfully authenticated as Steve"));
		assert_eq!(o.messages[1].1, MessageLevel::Extra);
	}
}
