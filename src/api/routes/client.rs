use axum::response::Html;

/// Minimal browser chat client. All chat history lives in transient page
/// state; the server keeps its own copy inside agent memory.
pub async fn client_page() -> Html<&'static str> {
    Html(CLIENT_PAGE)
}

const CLIENT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Smart Personal Agent</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
  #history { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; height: 420px; overflow-y: auto; }
  .msg { margin: 0.5rem 0; padding: 0.5rem 0.75rem; border-radius: 8px; white-space: pre-wrap; }
  .user { background: #e7f0fe; text-align: right; }
  .assistant { background: #f2f2f2; }
  #controls { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
  #input { flex: 1; padding: 0.5rem; }
  #upload-row { margin-top: 0.75rem; display: flex; gap: 0.5rem; align-items: center; }
  #doc-status { color: #2a7; font-size: 0.9rem; }
</style>
</head>
<body>
<h1>🤖 Smart Personal Agent</h1>
<div id="history"></div>
<div id="controls">
  <input id="input" placeholder="Type your message..." autocomplete="off">
  <button id="send">Send</button>
</div>
<div id="upload-row">
  <input type="file" id="file" accept=".pdf,.txt">
  <button id="upload">Upload</button>
  <span id="doc-status"></span>
</div>
<script>
let sessionId = null;

function addMessage(role, content) {
  const div = document.createElement('div');
  div.className = 'msg ' + role;
  div.textContent = content;
  const history = document.getElementById('history');
  history.appendChild(div);
  history.scrollTop = history.scrollHeight;
}

async function startSession() {
  const res = await fetch('/start_session', { method: 'POST' });
  const data = await res.json();
  sessionId = data.session_id;
  addMessage('assistant', "Hi! I'm your personal assistant. How can I help you today?");
}

async function sendMessage() {
  const input = document.getElementById('input');
  const text = input.value.trim();
  if (!text || !sessionId) return;
  input.value = '';
  addMessage('user', text);
  try {
    const res = await fetch('/chat', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ text, session_id: sessionId })
    });
    const data = await res.json();
    addMessage('assistant', res.ok ? data.response : 'Error: ' + (data.detail || res.status));
  } catch (e) {
    addMessage('assistant', 'Connection error: ' + e);
  }
}

async function uploadFile() {
  const picker = document.getElementById('file');
  const status = document.getElementById('doc-status');
  if (!picker.files.length || !sessionId) return;
  const form = new FormData();
  form.append('session_id', sessionId);
  form.append('file', picker.files[0]);
  status.textContent = 'Processing document...';
  try {
    const res = await fetch('/upload', { method: 'POST', body: form });
    const data = await res.json();
    status.textContent = res.ok
      ? 'Document is available for queries'
      : 'Error: ' + (data.detail || res.status);
  } catch (e) {
    status.textContent = 'Upload failed: ' + e;
  }
}

document.getElementById('send').addEventListener('click', sendMessage);
document.getElementById('input').addEventListener('keydown', e => {
  if (e.key === 'Enter') sendMessage();
});
document.getElementById('upload').addEventListener('click', uploadFile);
startSession();
</script>
</body>
</html>
"#;
