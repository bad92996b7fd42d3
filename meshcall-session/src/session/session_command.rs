/// Commands from the owning application (UI layer) into the session loop.
#[derive(Debug)]
pub enum SessionCommand {
    /// Acquire a screen track and route it to every live connection.
    StartScreenShare,

    /// Route the camera track back to every live connection. Also the entry
    /// point when the user revokes sharing at the OS level: the capture
    /// layer's owner observes the track ending and issues this command.
    StopScreenShare,

    /// Mute/unmute the shared microphone track (affects all peers).
    SetAudioEnabled(bool),

    /// Enable/disable the shared camera track (affects all peers).
    SetVideoEnabled(bool),

    /// Leave the room: announce departure, stop capture, close connections.
    Leave,
}
