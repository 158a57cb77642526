use crate::model::Track;

/// The ordered result set plus the playback position into it.
///
/// The set is replaced wholesale on every successful search, never merged or
/// appended. The position is `None` until a row is explicitly played; once
/// set it stays within `[0, len - 1]` and wraps modulo length on
/// next/previous/auto-advance.
#[derive(Debug, Default)]
pub struct PreviewQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PreviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set and forgets the previous position.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current = None;
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Sets the position to `index` and returns that track. Out-of-range
    /// indices are a no-op.
    pub fn select(&mut self, index: usize) -> Option<Track> {
        let track = self.tracks.get(index).cloned()?;
        self.current = Some(index);
        Some(track)
    }

    /// Advances with wraparound: past the last index wraps to 0. Before any
    /// selection, starts at the first track.
    pub fn next(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = match self.current {
            Some(i) => (i + 1) % self.tracks.len(),
            None => 0,
        };
        self.select(index)
    }

    /// Retreats with wraparound: before index 0 wraps to the last index.
    /// Before any selection, starts at the last track.
    pub fn previous(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        let index = match self.current {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.select(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                position: i,
                name: format!("track {i}"),
                artist: "artist".to_string(),
                preview_url: format!("https://example.com/{i}.m4a"),
                artwork_url: None,
                duration_secs: 30,
                genre: None,
                release_date: None,
            })
            .collect()
    }

    #[test]
    fn select_out_of_range_is_a_no_op() {
        let mut queue = PreviewQueue::new();
        queue.replace(tracks(3));
        assert!(queue.select(3).is_none());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn next_wraps_past_the_last_index() {
        let mut queue = PreviewQueue::new();
        queue.replace(tracks(3));
        queue.select(2);
        let track = queue.next().unwrap();
        assert_eq!(track.position, 0);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn previous_wraps_before_the_first_index() {
        let mut queue = PreviewQueue::new();
        queue.replace(tracks(3));
        queue.select(0);
        let track = queue.previous().unwrap();
        assert_eq!(track.position, 2);
        assert_eq!(queue.current_index(), Some(2));
    }

    #[test]
    fn replace_resets_the_position() {
        let mut queue = PreviewQueue::new();
        queue.replace(tracks(3));
        queue.select(1);
        queue.replace(tracks(2));
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn next_on_empty_set_is_none() {
        let mut queue = PreviewQueue::new();
        assert!(queue.next().is_none());
        assert!(queue.previous().is_none());
    }
}
