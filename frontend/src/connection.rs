use futures::stream::Stream;
use shared::{DownMsg, UpMsg};
use zoon::*;

/// Backend connection with its down messages turned into a stream.
pub struct ConnectionAdapter {
    connection: Connection<UpMsg, DownMsg>,
}

impl ConnectionAdapter {
    pub fn new() -> (Self, impl Stream<Item = DownMsg> + Unpin) {
        let (message_sender, message_stream) = futures::channel::mpsc::unbounded();

        let connection = Connection::new(move |down_msg, _| {
            let _ = message_sender.unbounded_send(down_msg);
        });

        (ConnectionAdapter { connection }, message_stream)
    }

    pub async fn send_up_msg(&self, up_msg: UpMsg) -> bool {
        match self.connection.send_up_msg(up_msg).await {
            Ok(_) => true,
            Err(error) => {
                zoon::eprintln!("Failed to send message: {:?}", error);
                false
            }
        }
    }
}
