use std::{fs, io};
use std::path::{Path, PathBuf};

const POST_EXTENSION: &str = "md";

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> PostList {
        PostList {
            root_dir: root_dir.to_path_buf(),
        }
    }

    /// Every markdown file under the root, in path order, so two runs over
    /// the same tree report in the same order.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        Self::collect_files(self.root_dir.as_path(), &mut posts)?;
        posts.sort();
        Ok(posts)
    }

    fn collect_files(dir: &Path, posts: &mut Vec<PathBuf>) -> io::Result<()> {
        let entries = fs::read_dir(dir)?;
        for entry in entries {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();

            if file_type.is_dir() {
                Self::collect_files(&path, posts)?;
            } else if file_type.is_file() && Self::is_post(&path) {
                posts.push(path);
            }
        }
        Ok(())
    }

    fn is_post(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == POST_EXTENSION)
            .unwrap_or(false)
    }
}
