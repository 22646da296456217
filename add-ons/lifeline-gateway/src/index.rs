//! Inline single-page frontend. Stateless: talks to the JSON API only and
//! never sees an API key.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Lifeline Emergency Assistant</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #1a1a1a; }
  h1 { font-size: 1.5rem; }
  textarea { width: 100%; min-height: 6rem; font-size: 1rem; padding: .5rem; box-sizing: border-box; }
  button { font-size: 1rem; padding: .6rem 1.2rem; margin-top: .5rem; cursor: pointer; }
  #guidance { white-space: pre-wrap; background: #f4f8f4; border-left: 4px solid #2e7d32; padding: 1rem; margin-top: 1rem; display: none; }
  #guidance.warn { background: #fdf3e7; border-left-color: #e65100; }
  #narration-note { color: #8a6d3b; display: none; margin-top: .5rem; }
  audio { width: 100%; margin-top: .75rem; display: none; }
  details { margin-top: 1.5rem; }
  table { border-collapse: collapse; width: 100%; }
  td, th { border: 1px solid #ccc; padding: .4rem .6rem; text-align: left; }
  .hint { color: #555; font-size: .9rem; }
</style>
</head>
<body>
<h1>&#128657; Lifeline Emergency Assistant</h1>
<p class="hint">Describe your emergency and get clear, step-by-step guidance until
professionals arrive. If the situation is life-threatening, call your local
emergency number first.</p>

<label for="report"><strong>Describe your emergency:</strong></label>
<textarea id="report" placeholder="E.g., Someone fainted, car accident, fire injury"></textarea>
<button id="submit">Get AI Assistance</button>

<div id="guidance"></div>
<div id="narration-note">Audio narration is unavailable right now; the text above is unaffected.</div>
<audio id="player" controls></audio>

<details>
  <summary>Emergency numbers by region</summary>
  <table id="numbers"><tr><th>Region</th><th>Number</th><th>Service</th></tr></table>
</details>
<details>
  <summary>Universal first-aid checklist</summary>
  <pre id="checklist"></pre>
</details>

<script>
const guidanceEl = document.getElementById('guidance');
const noteEl = document.getElementById('narration-note');
const playerEl = document.getElementById('player');

async function loadReference() {
  const res = await fetch('/api/v1/reference');
  if (!res.ok) return;
  const ref = await res.json();
  document.getElementById('checklist').textContent = ref.first_aid_checklist;
  const table = document.getElementById('numbers');
  for (const row of ref.emergency_numbers) {
    const tr = document.createElement('tr');
    for (const v of [row.region, row.number, row.service]) {
      const td = document.createElement('td');
      td.textContent = v;
      tr.appendChild(td);
    }
    table.appendChild(tr);
  }
}

function show(text, warn) {
  guidanceEl.textContent = text;
  guidanceEl.className = warn ? 'warn' : '';
  guidanceEl.style.display = 'block';
}

async function narrate(text) {
  noteEl.style.display = 'none';
  playerEl.style.display = 'none';
  try {
    const res = await fetch('/api/v1/narrate', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ text })
    });
    if (!res.ok) throw new Error('narration failed');
    const blob = await res.blob();
    playerEl.src = URL.createObjectURL(blob);
    playerEl.style.display = 'block';
  } catch (e) {
    noteEl.style.display = 'block';
  }
}

document.getElementById('submit').addEventListener('click', async () => {
  const report = document.getElementById('report').value;
  show('The assistant is preparing your instructions...', false);
  const res = await fetch('/api/v1/assist', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ report })
  });
  const body = await res.json();
  if (body.status === 'guidance') {
    show(body.guidance, false);
    narrate(body.guidance);
  } else if (body.status === 'degraded') {
    show(body.message + '\n\n' + body.checklist, true);
  } else {
    show(body.message, true);
  }
});

loadReference();
</script>
</body>
</html>
"#;
