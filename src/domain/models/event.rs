use tui_textarea::Input;

/// Assistant reply produced by the responder once its delay elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub ticket: u64,
    pub conversation_id: String,
    pub text: String,
}

pub enum Event {
    AssistantReply(Reply),
    KeyboardCharInput(Input),
    KeyboardCTRLB(),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
